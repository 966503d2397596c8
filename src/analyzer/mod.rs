//! Static analysis
//!
//! This module type-checks a parsed program before it runs:
//! - [`checker`]: The [`Analyzer`], the assignability rule and the
//!   global/function checks
//! - [`errors`]: Analysis error types
//! - `statements` / `expressions`: per-node checks as `impl Analyzer` blocks
//!
//! # Types
//!
//! Types are nominal: `Any`, `Nil`, `Boolean`, `Integer`, `Decimal`,
//! `Character`, `String` and `Comparable`. A value is assignable to a target
//! of the same type, and to `Any` or `Comparable` regardless of its type.
//!
//! The analyzer is independent of the interpreter: a program can be run
//! without being analyzed, and analysis never evaluates anything.

pub mod checker;
pub mod errors;

mod expressions;
mod statements;

pub use checker::{require_assignable, Analyzer, TypeScope, VariableType};
pub use errors::AnalysisError;

use crate::parser::ast::Source;

/// Type-check `source`, filling in its type annotations.
pub fn analyze(source: &mut Source) -> Result<(), AnalysisError> {
    Analyzer::new().analyze(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Type;
    use crate::parser::parse::Parser;
    use indoc::indoc;

    fn check(source: &str) -> Result<Source, AnalysisError> {
        let mut program = Parser::new(source).unwrap().parse_source().unwrap();
        analyze(&mut program)?;
        Ok(program)
    }

    #[test]
    fn test_requires_main() {
        assert_eq!(
            check("FUN helper ( ) DO END").unwrap_err(),
            AnalysisError::NoMainFunction
        );
        assert_eq!(
            check("FUN main ( x : Integer ) DO END").unwrap_err(),
            AnalysisError::NoMainFunction
        );
    }

    #[test]
    fn test_global_annotations() {
        let program = check(indoc! {"
            VAR x : Integer = 1 ;
            LIST names : String = [ \"a\" , \"b\" ] ;
            FUN main ( ) : Integer DO
                x = x + 1 ;
                RETURN x ;
            END
        "})
        .unwrap();

        assert_eq!(program.globals[0].ty, Some(Type::Integer));
        assert_eq!(
            program.globals[1].value.as_ref().and_then(|v| v.ty),
            Some(Type::String)
        );
        let signature = program.functions[0].signature.as_ref().unwrap();
        assert_eq!(signature.returns, Type::Integer);
    }

    #[test]
    fn test_list_elements_checked_against_declaration() {
        assert!(matches!(
            check("LIST xs : Integer = [ 1 , \"two\" ] ; FUN main ( ) DO END"),
            Err(AnalysisError::TypeMismatch {
                expected: Type::Integer,
                found: Type::String,
                ..
            })
        ));
    }

    #[test]
    fn test_mutual_recursion() {
        let result = check(indoc! {"
            FUN main ( ) : Boolean DO
                RETURN even ( 10 ) ;
            END
            FUN even ( n : Integer ) : Boolean DO
                IF n == 0 DO RETURN TRUE ; END
                RETURN odd ( n - 1 ) ;
            END
            FUN odd ( n : Integer ) : Boolean DO
                IF n == 0 DO RETURN FALSE ; END
                RETURN even ( n - 1 ) ;
            END
        "});
        assert!(result.is_ok(), "Analysis failed: {:?}", result);
    }

    #[test]
    fn test_return_without_declared_type_must_be_nil() {
        assert!(check("FUN main ( ) DO RETURN NIL ; END").is_ok());
        assert!(check("FUN main ( ) DO RETURN 1 ; END").is_err());
    }

    #[test]
    fn test_division_by_zero_is_not_an_analysis_error() {
        assert!(check("FUN main ( ) : Decimal DO RETURN 1.0 / 0.0 ; END").is_ok());
    }

    #[test]
    fn test_duplicate_function() {
        assert!(matches!(
            check("FUN main ( ) DO END FUN main ( ) DO END"),
            Err(AnalysisError::AlreadyDefined { .. })
        ));
    }
}
