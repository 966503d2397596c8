//! Expression parsing with one method per precedence level
//!
//! Binary operators are left-associative. Levels, lowest to highest:
//!
//! | Level          | Operators          |
//! |----------------|--------------------|
//! | logical        | `&&` `\|\|`        |
//! | comparison     | `<` `>` `==` `!=`  |
//! | additive       | `+` `-`            |
//! | multiplicative | `*` `/` `^`        |
//!
//! Primary expressions are literals, `NIL`/`TRUE`/`FALSE`, parenthesized
//! groups, calls `name ( args )`, indexed access `name [ expr ]` and plain
//! variable access.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical()
    }

    fn parse_logical(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["&&", "||"], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["<", ">", "==", "!="], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&["*", "/", "^"], Self::parse_primary)
    }

    /// Left-associative loop shared by every binary level.
    fn parse_binary_level(
        &mut self,
        operators: &[&str],
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = self.match_operator(operators) {
            let right = operand(self)?;
            let offset = left.offset;
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                offset,
            );
        }

        Ok(left)
    }

    fn match_operator(&mut self, operators: &[&str]) -> Option<BinOp> {
        let token = self.peek()?;
        if token.kind != TokenKind::Operator || !operators.contains(&token.literal.as_str()) {
            return None;
        }
        let op = BinOp::from_symbol(&token.literal)?;
        self.advance();
        Some(op)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.error_here("expression"));
        };
        let offset = token.offset;

        let literal = match token.kind {
            TokenKind::Integer => Some(Literal::Integer(
                BigInt::from_str(&token.literal).map_err(|_| invalid_literal(&token))?,
            )),
            TokenKind::Decimal => Some(Literal::Decimal(
                BigDecimal::from_str(&token.literal).map_err(|_| invalid_literal(&token))?,
            )),
            TokenKind::Character => {
                let decoded = decode_escapes(unquote(&token.literal));
                let mut chars = decoded.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Literal::Character(ch)),
                    _ => return Err(invalid_literal(&token)),
                }
            }
            TokenKind::String => Some(Literal::String(decode_escapes(unquote(&token.literal)))),
            TokenKind::Identifier => match token.literal.as_str() {
                "NIL" => Some(Literal::Nil),
                "TRUE" => Some(Literal::Boolean(true)),
                "FALSE" => Some(Literal::Boolean(false)),
                _ => None,
            },
            TokenKind::Operator => None,
        };

        if let Some(literal) = literal {
            self.advance();
            return Ok(Expr::new(ExprKind::Literal(literal), offset));
        }

        if self.match_token("(") {
            let inner = self.parse_expression()?;
            self.expect_token(")", "to close group")?;
            return Ok(Expr::new(ExprKind::Group(Box::new(inner)), offset));
        }

        if token.kind != TokenKind::Identifier {
            return Err(self.error_here("expression"));
        }
        let name = token.literal;
        self.advance();

        if self.match_token("(") {
            let mut args = Vec::new();
            if !self.check(")") {
                args.push(self.parse_expression()?);
                while self.match_token(",") {
                    args.push(self.parse_expression()?);
                }
            }
            self.expect_token(")", &format!("after arguments to '{name}'"))?;
            return Ok(Expr::new(ExprKind::Call { name, args }, offset));
        }

        let index = if self.match_token("[") {
            let index = self.parse_expression()?;
            self.expect_token("]", "after index")?;
            Some(Box::new(index))
        } else {
            None
        };

        Ok(Expr::new(ExprKind::Access { name, index }, offset))
    }
}

fn invalid_literal(token: &crate::parser::lexer::Token) -> ParseError {
    ParseError::InvalidLiteral {
        kind: token.kind,
        literal: token.literal.clone(),
        offset: token.offset,
    }
}

/// Strip the surrounding quote characters of a character or string literal.
fn unquote(literal: &str) -> &str {
    let mut chars = literal.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Replace escape sequences (`\b \n \r \t \' \" \\`) with the characters they name.
pub(crate) fn decode_escapes(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('b') => decoded.push('\u{8}'),
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some(other) => decoded.push(other),
            None => decoded.push('\\'),
        }
    }

    decoded
}
