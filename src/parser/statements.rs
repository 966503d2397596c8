//! Statement parsing implementation
//!
//! This module handles parsing of all PLC statement types:
//!
//! - Local declarations: `LET x : Integer = 1 ;`
//! - Control flow: `IF`, `SWITCH`, `WHILE`
//! - `RETURN expr ;`
//! - Assignments and expression statements: `x = 1 ;`, `print ( x ) ;`
//!
//! # Grammar
//!
//! ```text
//! block     ::= statement*
//! statement ::= 'LET' name ( ':' type )? ( '=' expr )? ';'
//!             | 'SWITCH' expr ( 'CASE' expr ':' block )* 'DEFAULT' block 'END'
//!             | 'IF' expr 'DO' block ( 'ELSE' block )? 'END'
//!             | 'WHILE' expr 'DO' block 'END'
//!             | 'RETURN' expr ';'
//!             | expr ( '=' expr )? ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};

/// Keywords that close an ordinary block.
const BLOCK_END: &[&str] = &["END", "ELSE"];

/// Keywords that close the body of a switch case.
const CASE_END: &[&str] = &["END", "ELSE", "CASE", "DEFAULT"];

impl Parser {
    /// Parse statements up to (not including) `END` or `ELSE`.
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.parse_block_until(BLOCK_END)
    }

    fn parse_block_until(&mut self, terminators: &[&str]) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() && !terminators.iter().any(|t| self.check(t)) {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token("LET") {
            return self.parse_declaration();
        }

        if self.match_token("SWITCH") {
            return self.parse_switch_statement();
        }

        if self.match_token("IF") {
            return self.parse_if_statement();
        }

        if self.match_token("WHILE") {
            return self.parse_while_statement();
        }

        if self.match_token("RETURN") {
            let value = self.parse_expression()?;
            self.expect_token(";", "after return value")?;
            return Ok(Stmt::Return(value));
        }

        let expr = self.parse_expression()?;
        if self.match_token("=") {
            let value = self.parse_expression()?;
            self.expect_token(";", "after assignment")?;
            return Ok(Stmt::Assignment {
                receiver: expr,
                value,
            });
        }

        self.expect_token(";", "after expression")?;
        Ok(Stmt::Expression(expr))
    }

    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier("after 'LET'")?;

        let type_name = if self.match_token(":") {
            Some(self.expect_identifier(&format!("as type of '{name}'"))?)
        } else {
            None
        };

        let value = if self.match_token("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };

        if type_name.is_none() && value.is_none() {
            return Err(self.error_here(&format!("':' or '=' in declaration of '{name}'")));
        }

        self.expect_token(";", "after declaration")?;
        Ok(Stmt::Declaration {
            name,
            type_name,
            value,
        })
    }

    fn parse_switch_statement(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression()?;
        let mut cases = Vec::new();

        while self.match_token("CASE") {
            let value = self.parse_expression()?;
            self.expect_token(":", "after case value")?;
            let body = self.parse_block_until(CASE_END)?;
            cases.push(Case {
                value: Some(value),
                body,
            });
        }

        self.expect_token("DEFAULT", "in switch")?;
        let body = self.parse_block_until(CASE_END)?;
        cases.push(Case { value: None, body });
        self.expect_token("END", "after switch")?;

        Ok(Stmt::Switch { condition, cases })
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression()?;
        self.expect_token("DO", "after if condition")?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token("ELSE") {
            self.parse_block()?
        } else {
            Vec::new()
        };
        self.expect_token("END", "after if statement")?;

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression()?;
        self.expect_token("DO", "after while condition")?;
        let body = self.parse_block()?;
        self.expect_token("END", "after while body")?;

        Ok(Stmt::While { condition, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn parse_body(body: &str) -> Result<Vec<Stmt>, ParseError> {
        let source = format!("FUN main ( ) DO\n{body}\nEND");
        let mut program = Parser::new(&source)?.parse_source()?;
        Ok(program.functions.remove(0).body)
    }

    fn access(name: &str) -> Expr {
        Expr::new(
            ExprKind::Access {
                name: name.to_string(),
                index: None,
            },
            0,
        )
    }

    #[test]
    fn test_declarations() {
        let body = parse_body("LET a : Integer ; LET b = 1 ; LET c : Decimal = 1.0 ;").unwrap();
        assert_eq!(body.len(), 3);
        assert!(matches!(
            &body[0],
            Stmt::Declaration { type_name: Some(t), value: None, .. } if t == "Integer"
        ));
        assert!(matches!(&body[1], Stmt::Declaration { type_name: None, value: Some(_), .. }));
    }

    #[test]
    fn test_declaration_needs_type_or_value() {
        assert!(parse_body("LET a ;").is_err());
        assert!(parse_body("LET a : Integer").is_err());
    }

    #[test]
    fn test_assignment_and_expression() {
        let body = parse_body("x = y ; f ( ) ;").unwrap();
        assert_eq!(
            body[0],
            Stmt::Assignment {
                receiver: access("x"),
                value: access("y"),
            }
        );
        assert!(matches!(&body[1], Stmt::Expression(Expr { kind: ExprKind::Call { .. }, .. })));
    }

    #[test]
    fn test_if_else() {
        let body = parse_body(indoc! {"
            IF ready DO
                go ( ) ;
            ELSE
                wait ( ) ;
                wait ( ) ;
            END
        "})
        .unwrap();

        match &body[0] {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert_eq!(then_branch.len(), 1);
                assert_eq!(else_branch.len(), 2);
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_cases() {
        let body = parse_body(indoc! {"
            SWITCH x
                CASE 1 :
                    print ( 1 ) ;
                CASE 2 :
                DEFAULT
                    print ( 0 ) ;
            END
        "})
        .unwrap();

        match &body[0] {
            Stmt::Switch { cases, .. } => {
                assert_eq!(cases.len(), 3);
                assert!(cases[0].value.is_some());
                assert!(cases[1].body.is_empty());
                assert!(cases[2].value.is_none());
                assert_eq!(cases[2].body.len(), 1);
            }
            other => panic!("Expected switch statement, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_requires_default() {
        assert!(parse_body("SWITCH x CASE 1 : END").is_err());
    }

    #[test]
    fn test_while_and_return() {
        let body = parse_body("WHILE x DO x = f ( ) ; END RETURN x ;").unwrap();
        assert!(matches!(&body[0], Stmt::While { body, .. } if body.len() == 1));
        assert_eq!(body[1], Stmt::Return(access("x")));
    }

    #[test]
    fn test_missing_semicolon_reports_offset() {
        let err = parse_body("RETURN x END").unwrap_err();
        assert!(matches!(err, ParseError::Unexpected { offset: 25, .. }));
    }
}
