//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing globals (`VAR`, `VAL`, `LIST`) and functions (`FUN`)
//! - `statements`: Parsing statements (`LET`, `IF`, `SWITCH`, `WHILE`, ...)
//! - `expressions`: Parsing expressions, one method per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! There is no error recovery: the first token that does not fit the grammar
//! aborts the parse.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The current token does not fit the grammar.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        offset: usize,
    },

    /// Input ran out; `offset` is the end of the last token.
    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: String, offset: usize },

    /// A literal token that could not be converted to a value.
    #[error("invalid {kind} literal '{literal}'")]
    InvalidLiteral {
        kind: TokenKind,
        literal: String,
        offset: usize,
    },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.offset(),
            ParseError::Unexpected { offset, .. }
            | ParseError::UnexpectedEnd { offset, .. }
            | ParseError::InvalidLiteral { offset, .. } => *offset,
        }
    }
}

/// Recursive descent parser for PLC
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Lex `source` and prepare a parser over its tokens.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program (globals, then functions, in any interleaving)
    pub fn parse_source(&mut self) -> Result<Source, ParseError> {
        let mut source = Source::new();

        while !self.is_at_end() {
            if self.check("FUN") {
                source.functions.push(self.parse_function()?);
            } else if self.check("VAR") || self.check("VAL") || self.check("LIST") {
                source.globals.push(self.parse_global()?);
            } else {
                return Err(self.error_here("'FUN', 'VAR', 'VAL' or 'LIST'"));
            }
        }

        tracing::debug!(
            globals = source.globals.len(),
            functions = source.functions.len(),
            "parsed source"
        );
        Ok(source)
    }

    // ===== Helper methods =====

    /// Whether the current token's literal is `literal`.
    ///
    /// Keywords are identifier tokens and string/character literals keep
    /// their quotes, so the literal alone identifies keywords and operators.
    pub(crate) fn check(&self, literal: &str) -> bool {
        self.peek().is_some_and(|t| t.literal == literal)
    }

    pub(crate) fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn match_token(&mut self, literal: &str) -> bool {
        if self.check(literal) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Offset of the current token, or the end of input.
    pub(crate) fn current_offset(&self) -> usize {
        match self.peek() {
            Some(token) => token.offset,
            None => self.end_offset(),
        }
    }

    fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, Token::end)
    }

    /// Error describing what was expected at the current position.
    pub(crate) fn error_here(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::Unexpected {
                expected: expected.to_string(),
                found: token.to_string(),
                offset: token.offset,
            },
            None => ParseError::UnexpectedEnd {
                expected: expected.to_string(),
                offset: self.end_offset(),
            },
        }
    }

    pub(crate) fn expect_token(&mut self, literal: &str, context: &str) -> Result<(), ParseError> {
        if self.match_token(literal) {
            Ok(())
        } else {
            Err(self.error_here(&format!("'{literal}' {context}")))
        }
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        if self.check_kind(TokenKind::Identifier) {
            let name = self.tokens[self.position].literal.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error_here(&format!("identifier {context}")))
        }
    }
}
