//! PLC interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`Interpreter`](engine::Interpreter), program entry and calls
//! - [`builtins`]: `print` and `logarithm`
//! - [`errors`]: runtime error types
//! - [`terminal`]: where `print` output goes
//!
//! # Execution Model
//!
//! The interpreter walks the AST directly. Runtime bindings live in an
//! explicit [`Env`](engine::Env) that is threaded through every statement and
//! expression; a `RETURN` travels outward as [`ControlFlow::Return`](engine::ControlFlow)
//! until the call boundary.

pub mod builtins;
pub mod engine;
pub mod errors;
pub mod terminal;

mod expressions;
mod jumps;
mod loops;
mod ops;
mod statements;

pub use engine::{ControlFlow, Interpreter, DEFAULT_MAX_CALL_DEPTH};
pub use errors::RuntimeError;
pub use terminal::{Terminal, TerminalLine};
