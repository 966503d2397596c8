//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse or analysis errors).
//!
//! All runtime errors are fatal - they halt execution and are reported with
//! the offset of the expression that raised them.

use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Undefined variable reference
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String, offset: usize },

    /// Undefined function call (name and argument count)
    #[error("undefined function '{name}' taking {arity} argument(s)")]
    UndefinedFunction {
        name: String,
        arity: usize,
        offset: usize,
    },

    /// A second definition of a name in the same frame
    #[error("'{name}' is already defined in this scope")]
    AlreadyDefined { name: String, offset: Option<usize> },

    /// Function argument count mismatch
    #[error("'{function}' expects {expected} argument(s), got {got}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
        offset: usize,
    },

    /// Operand or argument of the wrong class
    #[error("expected {expected}, got {got}")]
    TypeError {
        expected: String,
        got: String,
        offset: usize,
    },

    /// Division by a zero integer or decimal
    #[error("division by zero")]
    DivisionByZero { offset: usize },

    /// List index outside `0..len`
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds {
        index: String,
        len: usize,
        offset: usize,
    },

    /// Attempted to assign to a `VAL`
    #[error("cannot assign to immutable variable '{name}'")]
    ImmutableAssignment { name: String, offset: usize },

    /// Assignment whose receiver is not a variable or list element
    #[error("only variables and list elements can be assigned")]
    InvalidAssignmentTarget { offset: usize },

    /// Storing a list into an element of a list it contains, or of itself
    #[error("a list cannot contain itself")]
    CyclicList { offset: usize },

    /// More nested user function calls than the configured limit
    #[error("call depth limit of {limit} exceeded")]
    CallDepthExceeded { limit: usize, offset: usize },

    /// `^` with an exponent that is negative or too large to compute
    #[error("invalid exponent {exponent}")]
    InvalidExponent { exponent: String, offset: usize },

    /// `logarithm` of a value with no real logarithm
    #[error("logarithm of {value} is undefined")]
    InvalidLogarithm { value: String, offset: usize },

    /// Main function not found
    #[error("no function 'main' taking no arguments")]
    NoMainFunction,
}

impl RuntimeError {
    /// Byte offset the error refers to, when one is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            RuntimeError::UndefinedVariable { offset, .. }
            | RuntimeError::UndefinedFunction { offset, .. }
            | RuntimeError::ArgumentCountMismatch { offset, .. }
            | RuntimeError::TypeError { offset, .. }
            | RuntimeError::DivisionByZero { offset }
            | RuntimeError::IndexOutOfBounds { offset, .. }
            | RuntimeError::ImmutableAssignment { offset, .. }
            | RuntimeError::InvalidAssignmentTarget { offset }
            | RuntimeError::CyclicList { offset }
            | RuntimeError::CallDepthExceeded { offset, .. }
            | RuntimeError::InvalidExponent { offset, .. }
            | RuntimeError::InvalidLogarithm { offset, .. } => Some(*offset),
            RuntimeError::AlreadyDefined { offset, .. } => *offset,
            RuntimeError::NoMainFunction => None,
        }
    }

    pub(crate) fn type_error(expected: &str, got: &crate::memory::Value, offset: usize) -> Self {
        RuntimeError::TypeError {
            expected: expected.to_string(),
            got: got.type_name().to_string(),
            offset,
        }
    }
}
