//! PLC source code parser
//!
//! This module transforms PLC source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), extended by the `declarations`,
//!   `statements` and `expressions` submodules
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Globals: `VAR`, `VAL` (immutable), `LIST`
//! - Functions: `FUN name ( p : Type ) : Type DO ... END`
//! - Statements: `LET`, assignment, `IF`/`ELSE`, `SWITCH`/`CASE`/`DEFAULT`,
//!   `WHILE`, `RETURN`
//! - Expressions: literals, groups, calls, indexed access, binary operators
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;
