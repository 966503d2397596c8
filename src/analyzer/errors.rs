//! Static analysis error types
//!
//! [`AnalysisError`] covers every reason the analyzer rejects a program.
//! Analysis stops at the first error.

use crate::parser::ast::{BinOp, Type};
use thiserror::Error;

/// Errors reported by the analyzer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("unknown type '{name}'")]
    UnknownType { name: String, offset: Option<usize> },

    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String, offset: usize },

    #[error("undefined function '{name}' taking {arity} argument(s)")]
    UndefinedFunction {
        name: String,
        arity: usize,
        offset: usize,
    },

    #[error("'{name}' is already defined in this scope")]
    AlreadyDefined { name: String, offset: Option<usize> },

    /// A value of type `found` is not assignable to `expected`.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: Type,
        found: Type,
        offset: Option<usize>,
    },

    #[error("operator '{op}' cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: BinOp,
        left: Type,
        right: Type,
        offset: usize,
    },

    #[error("integer literal {literal} does not fit in 32 bits")]
    IntegerOutOfRange { literal: String, offset: usize },

    #[error("decimal literal {literal} is out of range")]
    DecimalOutOfRange { literal: String, offset: usize },

    #[error("parentheses must contain a binary expression")]
    InvalidGroup { offset: usize },

    #[error("declaration of '{name}' needs a type or an initial value")]
    UntypedDeclaration { name: String },

    #[error("only variables and list elements can be assigned")]
    InvalidAssignmentTarget { offset: usize },

    #[error("cannot assign to immutable variable '{name}'")]
    ImmutableAssignment { name: String, offset: usize },

    #[error("IF statement has an empty DO block")]
    EmptyThenBranch { offset: usize },

    #[error("only the last case of a SWITCH may omit its value, and it must")]
    MisplacedDefault { offset: usize },

    #[error("no function 'main' taking no arguments")]
    NoMainFunction,
}

impl AnalysisError {
    /// Byte offset the error refers to, when one is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            AnalysisError::UnknownType { offset, .. }
            | AnalysisError::AlreadyDefined { offset, .. }
            | AnalysisError::TypeMismatch { offset, .. } => *offset,
            AnalysisError::UndefinedVariable { offset, .. }
            | AnalysisError::UndefinedFunction { offset, .. }
            | AnalysisError::InvalidOperands { offset, .. }
            | AnalysisError::IntegerOutOfRange { offset, .. }
            | AnalysisError::DecimalOutOfRange { offset, .. }
            | AnalysisError::InvalidGroup { offset }
            | AnalysisError::InvalidAssignmentTarget { offset }
            | AnalysisError::ImmutableAssignment { offset, .. }
            | AnalysisError::EmptyThenBranch { offset }
            | AnalysisError::MisplacedDefault { offset } => Some(*offset),
            AnalysisError::UntypedDeclaration { .. } | AnalysisError::NoMainFunction => None,
        }
    }
}
