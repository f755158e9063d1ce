use nom::IResult;
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, one_of, satisfy, space0},
    combinator::{cut, map, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use super::{BinaryOperator, Expr, UnaryOperator};

/// Deepest nesting of groups, calls and signs the parser descends into
pub const MAX_NESTING: usize = 128;

/// Tallest expression tree the parser builds, bounding the recursion of
/// evaluating and dropping it
pub const MAX_HEIGHT: usize = 1024;

/// A parsed expression and the height of its tree
type Node = (Expr, usize);

fn too_deep(i: &str) -> nom::Err<Error<&str>> {
    nom::Err::Failure(Error::new(i, ErrorKind::TooLarge))
}

fn checked(i: &str, node: Node) -> IResult<&str, Node> {
    if node.1 > MAX_HEIGHT {
        return Err(too_deep(i));
    }
    Ok((i, node))
}

fn number_token(i: &str) -> IResult<&str, &str> {
    let exponent = recognize(tuple((one_of("eE"), one_of("+-"), digit1)));
    let tail = satisfy(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    recognize(pair(
        alt((digit1, recognize(pair(char('.'), digit1)))),
        many0(alt((exponent, recognize(tail)))),
    ))(i)
}

fn identifier(i: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(i)
}

fn string_literal(i: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c: char| c != '"'), cut(char('"')))(i)
}

fn parse_call_or_ident(i: &str, depth: usize) -> IResult<&str, Node> {
    let (i, name) = identifier(i)?;

    let arguments = delimited(
        preceded(space0, char('(')),
        separated_list0(preceded(space0, char(',')), |i| {
            parse_expression(i, depth + 1)
        }),
        cut(preceded(space0, char(')'))),
    );

    let (i, arguments) = opt(arguments)(i)?;
    match arguments {
        Some(arguments) => {
            let height = arguments.iter().map(|(_, h)| h + 1).max().unwrap_or(1);
            let arguments = arguments.into_iter().map(|(e, _)| e).collect();
            checked(i, (Expr::Call(name.to_string(), arguments), height))
        }
        None => Ok((i, (Expr::Ident(name.to_string()), 1))),
    }
}

fn parse_primary(i: &str, depth: usize) -> IResult<&str, Node> {
    let enclosed_expression = delimited(
        char('('),
        |i| parse_expression(i, depth + 1),
        cut(preceded(space0, char(')'))),
    );

    let (i, node) = preceded(
        space0,
        alt((
            map(enclosed_expression, |(e, h)| (Expr::Group(Box::new(e)), h + 1)),
            map(number_token, |s: &str| (Expr::Literal(s.to_string()), 1)),
            map(string_literal, |s: &str| (Expr::Str(s.to_string()), 1)),
            |i| parse_call_or_ident(i, depth),
        )),
    )(i)?;
    checked(i, node)
}

fn parse_unary(i: &str, depth: usize) -> IResult<&str, Node> {
    if depth > MAX_NESTING {
        return Err(too_deep(i));
    }

    let operator = preceded(
        space0,
        alt((
            value(UnaryOperator::Neg, char('-')),
            value(UnaryOperator::Plus, char('+')),
        )),
    );

    let (i, node) = alt((
        map(
            pair(operator, cut(|i| parse_unary(i, depth + 1))),
            |(op, (e, h))| (Expr::Unary(op, Box::new(e)), h + 1),
        ),
        |i| parse_primary(i, depth),
    ))(i)?;
    checked(i, node)
}

/// Folds a left-associative chain of `operand (operator operand)*`
fn fold_binary<'a, O, F>(
    i: &'a str,
    depth: usize,
    mut operator: O,
    mut operand: F,
) -> IResult<&'a str, Node>
where
    O: FnMut(&'a str) -> IResult<&'a str, BinaryOperator>,
    F: FnMut(&'a str, usize) -> IResult<&'a str, Node>,
{
    let (mut i, (mut expr, mut height)) = operand(i, depth)?;

    loop {
        let (rest, op) = match preceded(space0, &mut operator)(i) {
            Ok(parsed) => parsed,
            Err(nom::Err::Error(_)) => return Ok((i, (expr, height))),
            Err(e) => return Err(e),
        };
        let (rest, (r, r_height)) = cut(|i| operand(i, depth))(rest)?;

        height = height.max(r_height) + 1;
        if height > MAX_HEIGHT {
            return Err(too_deep(rest));
        }
        expr = Expr::Binary(op, Box::new(expr), Box::new(r));
        i = rest;
    }
}

fn multiplicative(i: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Mul, char('*')),
        value(BinaryOperator::Div, char('/')),
        value(BinaryOperator::Rem, char('%')),
    ))(i)
}

fn additive(i: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Add, char('+')),
        value(BinaryOperator::Sub, char('-')),
    ))(i)
}

fn parse_multiply(i: &str, depth: usize) -> IResult<&str, Node> {
    fold_binary(i, depth, multiplicative, parse_unary)
}

fn parse_expression(i: &str, depth: usize) -> IResult<&str, Node> {
    fold_binary(i, depth, additive, parse_multiply)
}

#[derive(Debug, Clone)]
pub struct ParseError(pub String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParseError: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

pub fn parse(i: &str) -> Result<Expr, ParseError> {
    match terminated(|i| parse_expression(i, 0), space0)(i) {
        Ok((remaining, (r, _))) => {
            if !remaining.is_empty() {
                return Err(ParseError(format!("Unexpected token at \"{}\"", remaining)));
            }
            Ok(r)
        }
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => Err(ParseError(
            "Expression is too deeply nested".to_string(),
        )),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(ParseError(format!("Unexpected token at \"{}\"", e.input)))
        }
        Err(_) => Err(ParseError("Parse Error".to_string())),
    }
}
