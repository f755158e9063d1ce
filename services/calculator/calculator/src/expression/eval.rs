use derive_more::Display;

use super::{BinaryOperator, Expr, UnaryOperator};

#[derive(Debug, Display, Clone, PartialEq)]
pub enum EvalError {
    #[display(fmt = "Division by zero")]
    DivisionByZero,

    #[display(fmt = "Unsupported {}", _0)]
    UnsupportedNode(String),

    #[display(fmt = "Malformed literal \"{}\"", _0)]
    MalformedLiteral(String),
}

impl std::error::Error for EvalError {}

type Apply = fn(f64, f64) -> Result<f64, EvalError>;

fn divide(l: f64, r: f64) -> Result<f64, EvalError> {
    if r == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(l / r)
}

fn literal(text: &str) -> Result<f64, EvalError> {
    let value = match text.parse::<i64>() {
        Ok(i) => i as f64,
        Err(_) => text
            .parse::<f64>()
            .map_err(|_| EvalError::MalformedLiteral(text.to_string()))?,
    };

    if !value.is_finite() {
        return Err(EvalError::MalformedLiteral(text.to_string()));
    }
    Ok(value)
}

/// Evaluates an arithmetic expression in double precision
///
/// Both operands of a binary operator are evaluated before either error is
/// returned, the left operand's error taking precedence.
pub fn eval(e: &Expr) -> Result<f64, EvalError> {
    match e {
        Expr::Binary(op, l, r) => {
            let apply: Apply = match op {
                BinaryOperator::Add => |l, r| Ok(l + r),
                BinaryOperator::Sub => |l, r| Ok(l - r),
                BinaryOperator::Mul => |l, r| Ok(l * r),
                BinaryOperator::Div => divide,
                BinaryOperator::Rem => {
                    return Err(EvalError::UnsupportedNode(format!("operator \"{}\"", op)))
                }
            };

            let left = eval(l);
            let right = eval(r);
            apply(left?, right?)
        }
        Expr::Unary(UnaryOperator::Neg, x) => eval(x).map(|v| -v),
        Expr::Unary(op, _) => Err(EvalError::UnsupportedNode(format!(
            "unary operator \"{}\"",
            op
        ))),
        Expr::Literal(text) => literal(text),
        Expr::Group(inner) => eval(inner),
        Expr::Ident(name) => Err(EvalError::UnsupportedNode(format!(
            "identifier \"{}\"",
            name
        ))),
        Expr::Call(name, _) => Err(EvalError::UnsupportedNode(format!(
            "call to \"{}\"",
            name
        ))),
        Expr::Str(_) => Err(EvalError::UnsupportedNode("string literal".to_string())),
    }
}
