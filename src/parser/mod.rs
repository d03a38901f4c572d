//! Parser for the textual fact/rule notation
//!
//! The notation is deliberately small:
//!
//! ```text
//! # facts end with a dot
//! human(socrates).
//! teacherOf(socrates, plato).
//!
//! # rules: comma-separated antecedents, "=>", one consequent
//! human(?x) => mortal(?x).
//! teacherOf(?x, ?y), human(?y) => studentOf(?y, ?x).
//! ```
//!
//! Variables carry a `?` sigil; bare identifiers in argument position are
//! constants; an identifier followed by parentheses is a nested compound
//! term. `#` starts a line comment.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::{map, opt},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use crate::engine::Rule;
use crate::term::{Predicate, Term};

/// Parser error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

/// A parsed top-level statement
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// A fact assertion (groundness is checked by the engine, not here)
    Fact(Predicate),
    /// An inference rule
    Rule(Rule),
}

/// Parse a full document into a list of statements
pub fn parse(input: &str) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    let mut rest = skip_ws(input);

    while !rest.is_empty() {
        match statement(rest) {
            Ok((remaining, stmt)) => {
                statements.push(stmt);
                rest = skip_ws(remaining);
            }
            Err(nom::Err::Incomplete(_)) => return Err(ParseError::UnexpectedEof),
            Err(_) => {
                return Err(ParseError::Syntax {
                    offset: input.len() - rest.len(),
                    message: format!("expected a fact or rule near {:?}", snippet(rest)),
                });
            }
        }
    }

    Ok(statements)
}

fn snippet(s: &str) -> &str {
    let end = s
        .char_indices()
        .nth(24)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}

/// Consume whitespace and `#` line comments
fn skip_ws(input: &str) -> &str {
    let mut rest = input;
    loop {
        let trimmed = rest.trim_start();
        if let Some(comment) = trimmed.strip_prefix('#') {
            rest = match comment.find('\n') {
                Some(i) => &comment[i + 1..],
                None => "",
            };
        } else if trimmed.len() != rest.len() {
            rest = trimmed;
        } else {
            return rest;
        }
    }
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    preceded(take_while(is_ws_char), inner)
}

fn is_ws_char(c: char) -> bool {
    c.is_whitespace()
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn variable(input: &str) -> IResult<&str, Term> {
    map(preceded(char('?'), identifier), Term::var)(input)
}

/// An argument term: variable, nested compound, or bare constant
fn term(input: &str) -> IResult<&str, Term> {
    let (input, _) = take_while(is_ws_char)(input)?;
    alt((variable, compound_or_constant))(input)
}

fn compound_or_constant(input: &str) -> IResult<&str, Term> {
    let (input, name) = identifier(input)?;
    let (input, args) = opt(arg_list)(input)?;
    let term = match args {
        Some(args) => Term::pred(name, args),
        None => Term::constant(name),
    };
    Ok((input, term))
}

fn arg_list(input: &str) -> IResult<&str, Vec<Term>> {
    delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), term),
        ws(char(')')),
    )(input)
}

/// A predicate in statement position: `functor` or `functor(args...)`
fn predicate(input: &str) -> IResult<&str, Predicate> {
    let (input, name) = ws(identifier)(input)?;
    let (input, args) = opt(arg_list)(input)?;
    Ok((input, Predicate::new(name, args.unwrap_or_default())))
}

fn fact_statement(input: &str) -> IResult<&str, Statement> {
    map(terminated(predicate, ws(char('.'))), Statement::Fact)(input)
}

fn rule_statement(input: &str) -> IResult<&str, Statement> {
    let (input, antecedents) = separated_list0(ws(char(',')), predicate)(input)?;
    let (input, _) = ws(tag("=>"))(input)?;
    let (input, consequent) = predicate(input)?;
    let (input, _) = ws(char('.'))(input)?;
    Ok((input, Statement::Rule(Rule::new(antecedents, consequent))))
}

fn statement(input: &str) -> IResult<&str, Statement> {
    // A rule and a fact share their prefix; try the rule first.
    alt((rule_statement, fact_statement))(input)
}
