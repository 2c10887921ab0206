//! Filter and ordering terms using nom.
//!
//! The CLI describes queries with small textual terms that are turned into
//! tree nodes against a table:
//!
//! ```text
//! age>=21          "t0"."age" >= ?
//! name~'%ann%'     "t0"."name" LIKE ?
//! deleted_at=null  "t0"."deleted_at" IS NULL
//! -created_at      ORDER BY "t0"."created_at" DESC
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{map, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, tuple},
    IResult,
};

use crate::ast::builders::constant;
use crate::ast::{Node, Operator, Value};
use crate::error::{QueryError, QueryResult};

/// `<field> <op> <literal>`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTerm {
    pub field: String,
    pub op: Operator,
    pub value: Value,
}

impl FilterTerm {
    /// Resolve the field against `table` and build the condition.
    ///
    /// Equality with `null` becomes `IS NULL`, inequality `IS NOT NULL`.
    pub fn to_expr(&self, table: &Node) -> QueryResult<Node> {
        let field = table.field(&self.field)?;
        Ok(match (&self.value, self.op) {
            (Value::Null, Operator::Eq) => field.is_null(),
            (Value::Null, Operator::Ne) => field.is_not_null(),
            (value, op) => field.binary(op, constant(value.clone())),
        })
    }
}

/// `<field>` or `-<field>` for descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    pub field: String,
    pub descending: bool,
}

impl OrderTerm {
    pub fn to_expr(&self, table: &Node) -> QueryResult<Node> {
        let field = table.field(&self.field)?;
        Ok(if self.descending { field.desc() } else { field })
    }
}

fn finish<T>(input: &str, result: IResult<&str, T>) -> QueryResult<T> {
    match result {
        Ok((remaining, term)) if remaining.trim().is_empty() => Ok(term),
        Ok((remaining, _)) => Err(QueryError::parse(
            input.len() - remaining.len(),
            format!("Unexpected trailing content: '{}'", remaining),
        )),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::MapRes => Err(QueryError::parse(
            input.len() - e.input.len(),
            "Numeric literal out of range",
        )),
        Err(e) => Err(QueryError::parse(0, format!("Parse failed: {:?}", e))),
    }
}

/// Parse a filter term such as `age>=21`.
pub fn parse_filter(input: &str) -> QueryResult<FilterTerm> {
    let input = input.trim();
    finish(input, filter_term(input))
}

/// Parse an ordering term such as `-created_at`.
pub fn parse_order(input: &str) -> QueryResult<OrderTerm> {
    let input = input.trim();
    finish(input, order_term(input))
}

fn filter_term(input: &str) -> IResult<&str, FilterTerm> {
    let (input, field) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, op) = parse_operator(input)?;
    let (input, _) = multispace0(input)?;
    let (input, value) = parse_value(input)?;

    Ok((
        input,
        FilterTerm {
            field: field.to_string(),
            op,
            value,
        },
    ))
}

fn order_term(input: &str) -> IResult<&str, OrderTerm> {
    let (input, desc) = opt(char('-'))(input)?;
    let (input, field) = parse_identifier(input)?;

    Ok((
        input,
        OrderTerm {
            field: field.to_string(),
            descending: desc.is_some(),
        },
    ))
}

/// Parse an identifier (column or field name).
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn parse_operator(input: &str) -> IResult<&str, Operator> {
    alt((
        value(Operator::Ge, tag(">=")),
        value(Operator::Le, tag("<=")),
        value(Operator::Ne, tag("!=")),
        value(Operator::Ne, tag("<>")),
        value(Operator::Gt, char('>')),
        value(Operator::Lt, char('<')),
        value(Operator::Eq, char('=')),
        value(Operator::Like, char('~')),
    ))(input)
}

/// Parse a literal value.
fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((
        parse_number,
        parse_quoted_string,
        // Bare words: keywords, otherwise treated as strings
        map(parse_identifier, |s: &str| match s.to_ascii_lowercase().as_str() {
            "null" => Value::Null,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(s.to_string()),
        }),
    ))(input)
}

/// Parse a number (integer or float).
///
/// A literal that does not fit is a hard failure, so it is not retried as a
/// bare word.
fn parse_number(input: &str) -> IResult<&str, Value> {
    let (rest, num_str) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
    )))(input)?;

    let value = if num_str.contains('.') {
        num_str
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Float)
    } else {
        num_str.parse::<i64>().ok().map(Value::Int)
    };

    match value {
        Some(value) => Ok((rest, value)),
        None => Err(nom::Err::Failure(Error::new(input, ErrorKind::MapRes))),
    }
}

/// Parse a quoted string; `''` inside stands for one quote.
fn parse_quoted_string(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('\'')(input)?;
    let (input, parts) = many0(alt((
        take_while1(|c: char| c != '\''),
        value("'", tag("''")),
    )))(input)?;
    let (input, _) = char('\'')(input)?;

    Ok((input, Value::String(parts.concat())))
}
