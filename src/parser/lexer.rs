//! Lexer (tokenizer) for PLC source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Keywords are not special here: `FUN`, `LET`, `END` and friends come out as
//! [`TokenKind::Identifier`] tokens and the parser tells them apart by literal.
//!
//! Identifiers and numbers must be followed by whitespace or `;`, so operands
//! and punctuation are separated by spaces in PLC programs (`f ( x )`, `x + 1`).

use std::fmt;
use thiserror::Error;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal",
            TokenKind::Character => "character",
            TokenKind::String => "string",
            TokenKind::Operator => "operator",
        };
        f.write_str(name)
    }
}

/// A single lexed token.
///
/// `literal` is the exact source text, quotes and escapes included; decoding
/// happens in the parser. `offset` is the byte offset of the first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            literal: literal.into(),
            offset,
        }
    }

    /// Byte offset just past the end of this token.
    pub fn end(&self) -> usize {
        self.offset + self.literal.len()
    }

    pub fn is(&self, kind: TokenKind, literal: &str) -> bool {
        self.kind == kind && self.literal == literal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.literal)
    }
}

/// Lexical errors. Every variant carries the byte offset of the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{found}' after {after}")]
    UnexpectedCharacter {
        found: char,
        after: &'static str,
        offset: usize,
    },

    #[error("number has a leading zero")]
    LeadingZero { offset: usize },

    #[error("expected a digit after the decimal point")]
    MissingFraction { offset: usize },

    #[error("empty character literal")]
    EmptyCharacter { offset: usize },

    #[error("character literal holds more than one character")]
    InvalidCharacter { offset: usize },

    #[error("unterminated character literal")]
    UnterminatedCharacter { offset: usize },

    #[error("unterminated string literal")]
    UnterminatedString { offset: usize },

    #[error("line break inside literal")]
    LineBreak { offset: usize },

    #[error("invalid escape sequence")]
    InvalidEscape { offset: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { offset, .. }
            | LexError::LeadingZero { offset }
            | LexError::MissingFraction { offset }
            | LexError::EmptyCharacter { offset }
            | LexError::InvalidCharacter { offset }
            | LexError::UnterminatedCharacter { offset }
            | LexError::UnterminatedString { offset }
            | LexError::LineBreak { offset }
            | LexError::InvalidEscape { offset } => *offset,
        }
    }
}

/// Characters skipped between tokens and accepted as token terminators.
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\u{8}' | '\n' | '\r' | '\t')
}

/// Characters allowed after the backslash of an escape sequence.
pub(crate) fn is_escape(ch: char) -> bool {
    matches!(ch, 'b' | 'n' | 'r' | 't' | '\'' | '"' | '\\')
}

pub struct Lexer<'a> {
    source: &'a str,
    input: Vec<char>,
    position: usize,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.chars().collect(),
            position: 0,
            offset: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            while self.peek().is_some_and(is_whitespace) {
                self.advance();
            }

            let Some(ch) = self.peek() else {
                break;
            };

            let token = match ch {
                'a'..='z' | 'A'..='Z' | '@' => self.identifier()?,
                '0'..='9' => self.number()?,
                '-' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => self.number()?,
                '\'' => self.character()?,
                '"' => self.string()?,
                _ => self.operator(),
            };
            tokens.push(token);
        }

        tracing::trace!(count = tokens.len(), "lexed tokens");
        Ok(tokens)
    }

    fn identifier(&mut self) -> Result<Token, LexError> {
        let start = self.offset;
        self.advance();
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            self.advance();
        }
        self.expect_terminator("identifier", false)?;
        Ok(self.token(TokenKind::Identifier, start))
    }

    fn number(&mut self) -> Result<Token, LexError> {
        let start = self.offset;
        if self.peek() == Some('-') {
            self.advance();
        }

        if self.peek() == Some('0') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            return Err(LexError::LeadingZero {
                offset: self.offset,
            });
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.expect_terminator("number", true)?;

        if self.peek() != Some('.') {
            return Ok(self.token(TokenKind::Integer, start));
        }

        self.advance();
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(LexError::MissingFraction {
                offset: self.offset,
            });
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.expect_terminator("number", false)?;
        Ok(self.token(TokenKind::Decimal, start))
    }

    fn character(&mut self) -> Result<Token, LexError> {
        let start = self.offset;
        self.advance();

        match self.peek() {
            None => return Err(LexError::UnterminatedCharacter { offset: start }),
            Some('\'') => return Err(LexError::EmptyCharacter { offset: start }),
            Some('\n' | '\r') => {
                return Err(LexError::LineBreak {
                    offset: self.offset,
                })
            }
            Some('\\') => self.escape()?,
            Some(_) => {
                self.advance();
            }
        }

        match self.peek() {
            Some('\'') => {
                self.advance();
                Ok(self.token(TokenKind::Character, start))
            }
            None => Err(LexError::UnterminatedCharacter { offset: start }),
            Some(_) => Err(LexError::InvalidCharacter {
                offset: self.offset,
            }),
        }
    }

    fn string(&mut self) -> Result<Token, LexError> {
        let start = self.offset;
        self.advance();

        loop {
            match self.peek() {
                None => return Err(LexError::UnterminatedString { offset: start }),
                Some('"') => {
                    self.advance();
                    return Ok(self.token(TokenKind::String, start));
                }
                Some('\n' | '\r') => {
                    return Err(LexError::LineBreak {
                        offset: self.offset,
                    })
                }
                Some('\\') => self.escape()?,
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn escape(&mut self) -> Result<(), LexError> {
        self.advance();
        match self.peek() {
            Some(c) if is_escape(c) => {
                self.advance();
                Ok(())
            }
            _ => Err(LexError::InvalidEscape {
                offset: self.offset,
            }),
        }
    }

    fn operator(&mut self) -> Token {
        let start = self.offset;
        let first = self.advance();
        match (first, self.peek()) {
            (Some('<' | '>' | '=' | '!'), Some('=')) | (Some('&'), Some('&')) | (Some('|'), Some('|')) => {
                self.advance();
            }
            _ => {}
        }
        self.token(TokenKind::Operator, start)
    }

    /// Identifiers and numbers must end at whitespace, `;`, end of input, or
    /// (for the integer part of a number) a decimal point.
    fn expect_terminator(&self, after: &'static str, allow_dot: bool) -> Result<(), LexError> {
        match self.peek() {
            None => Ok(()),
            Some(c) if is_whitespace(c) || c == ';' => Ok(()),
            Some('.') if allow_dot => Ok(()),
            Some(found) => Err(LexError::UnexpectedCharacter {
                found,
                after,
                offset: self.offset,
            }),
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, &self.source[start..self.offset], start)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        self.offset += ch.len_utf8();
        Some(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new(source).tokenize()
    }

    #[test]
    fn test_identifiers() {
        let tokens = lex("getName thelegend27 a-b-c snake_case @at").unwrap();

        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(tokens[2].literal, "a-b-c");
        assert_eq!(tokens[4].literal, "@at");
        assert_eq!(tokens[4].offset, 37);
    }

    #[test]
    fn test_identifier_terminators() {
        assert_eq!(lex("name;").unwrap().len(), 2);
        assert!(matches!(
            lex("name("),
            Err(LexError::UnexpectedCharacter { found: '(', offset: 4, .. })
        ));
        assert!(lex("a@b").is_err());
        assert!(lex("1fish").is_err());
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("0 1 -5 123456789012345678901234567890 1.5 -0.25").unwrap();

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Decimal,
                TokenKind::Decimal,
            ]
        );
        assert_eq!(tokens[2].literal, "-5");
        assert_eq!(tokens[5].literal, "-0.25");
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(lex("007"), Err(LexError::LeadingZero { offset: 0 })));
        assert!(matches!(lex("-01"), Err(LexError::LeadingZero { offset: 1 })));
        assert!(matches!(lex("1."), Err(LexError::MissingFraction { offset: 2 })));
        assert!(matches!(lex("1.2.3"), Err(LexError::UnexpectedCharacter { .. })));
        assert!(matches!(lex("12)"), Err(LexError::UnexpectedCharacter { .. })));
    }

    #[test]
    fn test_minus_without_digit_is_operator() {
        let tokens = lex("x - y").unwrap();
        assert!(tokens[1].is(TokenKind::Operator, "-"));
    }

    #[test]
    fn test_characters() {
        let tokens = lex(r"'a' '\n' '\''").unwrap();
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Character));
        assert_eq!(tokens[1].literal, r"'\n'");

        assert!(matches!(lex("''"), Err(LexError::EmptyCharacter { .. })));
        assert!(matches!(lex("'ab'"), Err(LexError::InvalidCharacter { offset: 2 })));
        assert!(matches!(lex("'a"), Err(LexError::UnterminatedCharacter { .. })));
        assert!(matches!(lex(r"'\q'"), Err(LexError::InvalidEscape { offset: 2 })));
    }

    #[test]
    fn test_strings() {
        let tokens = lex(r#""" "abc" "Hello,\nWorld\"""#).unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::String));

        assert!(matches!(lex("\"open"), Err(LexError::UnterminatedString { offset: 0 })));
        assert!(matches!(lex("\"a\nb\""), Err(LexError::LineBreak { offset: 2 })));
        assert!(matches!(lex(r#""\d""#), Err(LexError::InvalidEscape { .. })));
    }

    #[test]
    fn test_operators() {
        let tokens = lex("<= >= == != && || < = ( ) ; , [ ] + ^").unwrap();
        let literals: Vec<_> = tokens.iter().map(|t| t.literal.as_str()).collect();

        assert_eq!(
            literals,
            vec!["<=", ">=", "==", "!=", "&&", "||", "<", "=", "(", ")", ";", ",", "[", "]", "+", "^"]
        );
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Operator));
    }

    #[test]
    fn test_whitespace_and_offsets() {
        let tokens = lex("LET x\t=\r\n1 ;").unwrap();
        let offsets: Vec<_> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 4, 6, 9, 11]);
    }
}
