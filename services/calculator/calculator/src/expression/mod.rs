use derive_more::Display;

pub use eval::{eval, EvalError};
pub use parser::{parse, ParseError};

mod eval;
mod parser;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    #[display(fmt = "+")]
    Add,
    #[display(fmt = "-")]
    Sub,
    #[display(fmt = "*")]
    Mul,
    #[display(fmt = "/")]
    Div,
    #[display(fmt = "%")]
    Rem,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    #[display(fmt = "-")]
    Neg,
    #[display(fmt = "+")]
    Plus,
}

/// A parsed expression
///
/// The grammar accepted by the parser is wider than what [`eval`] computes,
/// anything outside plain arithmetic is rejected at evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric token exactly as written
    Literal(String),
    Ident(String),
    Str(String),
    Call(String, Vec<Expr>),
    Group(Box<Expr>),
    Unary(UnaryOperator, Box<Expr>),
    Binary(BinaryOperator, Box<Expr>, Box<Expr>),
}
