//! Parsing and serialization in standard and Polish notation.
//!
//! Standard notation is fully parenthesized infix: every binary operation is
//! wrapped in its own pair of parentheses, so no precedence rules are needed
//! and a single left-to-right pass recovers the unique tree.
//!
//! Polish notation is prefix without delimiters. Only `~`, `&`, `|` and `->`
//! (plus the constants) belong to its grammar.

use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::syntax::{BinaryOp, Formula, Node};

/// Failure to read a formula, with the byte offset where it was detected.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected end of input at position {position}, expected {expected}")]
    UnexpectedEnd { position: usize, expected: &'static str },
    #[error("unexpected symbol {found:?} at position {position}, expected {expected}")]
    UnexpectedSymbol {
        position: usize,
        found: char,
        expected: &'static str,
    },
    #[error("missing or invalid binary operator at position {position}")]
    MissingOperator { position: usize },
    #[error("missing closing ')' at position {position}")]
    MissingClosingParen { position: usize },
    #[error("unexpected trailing input {rest:?} at position {position}")]
    TrailingInput { position: usize, rest: String },
    #[error("unknown operator symbol {0:?}")]
    UnknownOperator(String),
}

/// Recursive-descent reader over a cursor into the input.
///
/// Every rule either consumes its construct and returns it, or fails; a
/// failure is final and is never retried from an earlier position.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            None => ParseError::UnexpectedEnd {
                position: self.pos,
                expected,
            },
            Some(found) => ParseError::UnexpectedSymbol {
                position: self.pos,
                found,
                expected,
            },
        }
    }

    /// Consumes a variable name. The cursor must be at a letter `p`..=`z`.
    fn variable(&mut self) -> Formula {
        let start = self.pos;
        self.pos += 1;
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        self.pos += digits;
        Formula::variable(&self.input[start..self.pos])
    }

    fn finish(&self) -> Result<(), ParseError> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(ParseError::TrailingInput {
                position: self.pos,
                rest: self.rest().to_string(),
            })
        }
    }

    fn standard(&mut self) -> Result<Formula, ParseError> {
        const EXPECTED: &str = "'(', '~', a variable or a constant";

        match self.peek() {
            Some('p'..='z') => Ok(self.variable()),
            Some(c @ ('T' | 'F')) => {
                self.pos += 1;
                Ok(Formula::constant(c == 'T'))
            }
            Some('~') => {
                self.pos += 1;
                let first = self.standard()?;
                Ok(Formula::not(first))
            }
            Some('(') => {
                self.pos += 1;
                let first = self.standard()?;
                let op = self.binary_operator()?;
                let second = self.standard()?;
                if !self.eat(")") {
                    return Err(ParseError::MissingClosingParen { position: self.pos });
                }
                Ok(Formula::binary(op, first, second))
            }
            _ => Err(self.unexpected(EXPECTED)),
        }
    }

    fn binary_operator(&mut self) -> Result<BinaryOp, ParseError> {
        for op in BinaryOp::MATCH_ORDER {
            if self.eat(op.symbol()) {
                return Ok(op);
            }
        }
        Err(ParseError::MissingOperator { position: self.pos })
    }

    fn polish(&mut self) -> Result<Formula, ParseError> {
        const EXPECTED: &str = "'~', '&', '|', '->', a variable or a constant";

        match self.peek() {
            Some('p'..='z') => Ok(self.variable()),
            Some(c @ ('T' | 'F')) => {
                self.pos += 1;
                Ok(Formula::constant(c == 'T'))
            }
            Some('~') => {
                self.pos += 1;
                let first = self.polish()?;
                Ok(Formula::not(first))
            }
            Some(c @ ('&' | '|')) => {
                self.pos += 1;
                let op = if c == '&' { BinaryOp::And } else { BinaryOp::Or };
                let first = self.polish()?;
                let second = self.polish()?;
                Ok(Formula::binary(op, first, second))
            }
            Some('-') if self.eat("->") => {
                let first = self.polish()?;
                let second = self.polish()?;
                Ok(Formula::implies(first, second))
            }
            _ => Err(self.unexpected(EXPECTED)),
        }
    }
}

impl Formula {
    /// Parses the longest prefix of `s` that forms a formula in standard notation.
    ///
    /// Returns the formula together with the unparsed remainder. A variable
    /// name is always consumed whole, so `x12` never parses as `x1` followed
    /// by `2`.
    pub fn parse_prefix(s: &str) -> Result<(Formula, &str), ParseError> {
        let mut parser = Parser::new(s);
        let formula = parser.standard()?;
        Ok((formula, parser.rest()))
    }

    /// Checks if `s` is, in its entirety, a formula in standard notation.
    pub fn is_formula(s: &str) -> bool {
        matches!(Formula::parse_prefix(s), Ok((_, rest)) if rest.is_empty())
    }

    /// Parses a formula in standard notation.
    pub fn parse(s: &str) -> Result<Formula, ParseError> {
        let mut parser = Parser::new(s);
        parser
            .standard()
            .and_then(|formula| parser.finish().map(|_| formula))
            .map_err(|e| {
                debug!("parse({:?}) failed: {}", s, e);
                e
            })
    }

    /// Polish (prefix) representation of the formula.
    pub fn polish(&self) -> String {
        let mut out = String::new();
        self.write_polish(&mut out);
        out
    }

    fn write_polish(&self, out: &mut String) {
        out.push_str(self.root());
        match self.node() {
            Node::Variable(_) | Node::Constant(_) => {}
            Node::Not(first) => first.write_polish(out),
            Node::Binary(_, first, second) => {
                first.write_polish(out);
                second.write_polish(out);
            }
        }
    }

    /// Parses a formula in Polish notation.
    pub fn parse_polish(s: &str) -> Result<Formula, ParseError> {
        let mut parser = Parser::new(s);
        parser
            .polish()
            .and_then(|formula| parser.finish().map(|_| formula))
            .map_err(|e| {
                debug!("parse_polish({:?}) failed: {}", s, e);
                e
            })
    }
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}
