//! # Introduction
//!
//! `plc` lexes, parses, type checks and interprets programs written in PLC, a
//! small statically typed scripting language, and can render them as Java or
//! back into formatted PLC.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Analyzer → Interpreter
//!                                          ↘ Java generator / formatter
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`analyzer`]: resolves names, checks types and annotates the AST.
//! 3. [`interpreter`]: walks the AST and returns the value of `main`.
//! 4. [`emit`]: Java code generation and the source formatter.
//! 5. [`memory`]: the [`Scope`](memory::Scope) chain both passes use, and
//!    runtime [`Value`]s.
//!
//! ## Example
//!
//! ```
//! let outcome = plc::run_source(
//!     "FUN main ( ) : Integer DO\n  RETURN 1 + 2 ;\nEND",
//!     &plc::RunConfig::captured(),
//! )
//! .unwrap();
//! assert_eq!(outcome.value.to_string(), "3");
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod emit;
pub mod interpreter;
pub mod memory;
pub mod parser;

pub use analyzer::{analyze, AnalysisError};
pub use config::{Mode, RunConfig};
pub use interpreter::{Interpreter, RuntimeError, Terminal};
pub use memory::Value;
pub use parser::ast::Source;
pub use parser::lexer::{LexError, Token};
pub use parser::parse::ParseError;

use parser::lexer::Lexer;
use parser::parse::Parser;
use thiserror::Error;

/// Any error from any pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Byte offset into the source, when the error has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Lex(e) => Some(e.offset()),
            Error::Parse(e) => Some(e.offset()),
            Error::Analysis(e) => e.offset(),
            Error::Runtime(e) => e.offset(),
        }
    }

    /// Name of the pass that failed.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) | Error::Parse(ParseError::Lex(_)) => "lex",
            Error::Parse(_) => "parse",
            Error::Analysis(_) => "analysis",
            Error::Runtime(_) => "runtime",
        }
    }
}

/// Result of running a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// What `main` returned
    pub value: Value,
    /// Printed lines, when output was captured
    pub output: Vec<String>,
}

#[tracing::instrument(skip_all)]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).tokenize()?;
    tracing::debug!(tokens = tokens.len(), "lexed");
    Ok(tokens)
}

pub fn parse(source: &str) -> Result<Source, Error> {
    let tokens = lex(source)?;
    Ok(Parser::from_tokens(tokens).parse_source()?)
}

/// Parse and analyze without running.
pub fn check_source(source: &str) -> Result<Source, Error> {
    let mut program = parse(source)?;
    analyze(&mut program)?;
    Ok(program)
}

/// Parse, optionally analyze, and run a program.
pub fn run_source(source: &str, config: &RunConfig) -> Result<Outcome, Error> {
    let mut program = parse(source)?;
    if config.analyze {
        analyze(&mut program)?;
    }

    let terminal = if config.capture_output {
        Terminal::captured()
    } else {
        Terminal::stdout()
    };
    let mut interpreter = Interpreter::new(terminal).with_max_call_depth(config.max_call_depth);
    let value = interpreter.run(&program)?;

    Ok(Outcome {
        value,
        output: interpreter.terminal().get_output(),
    })
}

/// Analyze a program and render it as Java.
pub fn emit_java(source: &str) -> Result<String, Error> {
    let program = check_source(source)?;
    Ok(emit::java::generate(&program))
}

/// Re-format a program in canonical layout.
pub fn format_source(source: &str) -> Result<String, Error> {
    let program = parse(source)?;
    Ok(emit::source::format(&program))
}
