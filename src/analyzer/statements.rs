//! Statement checks
//!
//! `returns` is the declared return type of the enclosing function (`Nil`
//! when none is declared) and is handed down into every nested block so a
//! `RETURN` at any depth is checked against it.

use crate::analyzer::checker::{require_assignable, resolve_type, Analyzer, TypeScope, VariableType};
use crate::analyzer::errors::AnalysisError;
use crate::parser::ast::*;

impl Analyzer {
    pub(crate) fn check_statement(
        &self,
        scope: &mut TypeScope,
        stmt: &mut Stmt,
        returns: Type,
    ) -> Result<(), AnalysisError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.check_expr(scope, expr)?;
                Ok(())
            }

            Stmt::Declaration {
                name,
                type_name,
                value,
            } => {
                let offset = value.as_ref().map(|v| v.offset);
                let declared = type_name
                    .as_deref()
                    .map(|t| resolve_type(t, offset))
                    .transpose()?;

                let ty = match (declared, value) {
                    (Some(declared), Some(value)) => {
                        let value_ty = self.check_expr(scope, value)?;
                        require_assignable(declared, value_ty, Some(value.offset))?;
                        declared
                    }
                    (Some(declared), None) => declared,
                    (None, Some(value)) => self.check_expr(scope, value)?,
                    (None, None) => {
                        return Err(AnalysisError::UntypedDeclaration { name: name.clone() })
                    }
                };

                if scope.defines_variable_here(name) {
                    return Err(AnalysisError::AlreadyDefined {
                        name: name.clone(),
                        offset,
                    });
                }
                scope.define_variable(name.clone(), VariableType { ty, mutable: true });
                Ok(())
            }

            Stmt::Assignment { receiver, value } => {
                let ExprKind::Access { name, .. } = &receiver.kind else {
                    return Err(AnalysisError::InvalidAssignmentTarget {
                        offset: receiver.offset,
                    });
                };
                let name = name.clone();
                let target = self.check_expr(scope, receiver)?;
                if scope.lookup_variable(&name).is_some_and(|variable| !variable.mutable) {
                    return Err(AnalysisError::ImmutableAssignment {
                        name,
                        offset: receiver.offset,
                    });
                }
                let value_ty = self.check_expr(scope, value)?;
                require_assignable(target, value_ty, Some(value.offset))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.check_condition(scope, condition)?;
                if then_branch.is_empty() {
                    return Err(AnalysisError::EmptyThenBranch {
                        offset: condition.offset,
                    });
                }
                self.check_block(scope, then_branch, returns)?;
                self.check_block(scope, else_branch, returns)
            }

            Stmt::Switch { condition, cases } => {
                let condition_ty = self.check_expr(scope, condition)?;
                let last = cases.len().saturating_sub(1);

                for (i, case) in cases.iter_mut().enumerate() {
                    match (&mut case.value, i == last) {
                        (Some(value), false) => {
                            let value_ty = self.check_expr(scope, value)?;
                            require_assignable(condition_ty, value_ty, Some(value.offset))?;
                        }
                        (None, true) => {}
                        (Some(value), true) => {
                            return Err(AnalysisError::MisplacedDefault {
                                offset: value.offset,
                            })
                        }
                        (None, false) => {
                            return Err(AnalysisError::MisplacedDefault {
                                offset: condition.offset,
                            })
                        }
                    }
                    self.check_block(scope, &mut case.body, returns)?;
                }
                Ok(())
            }

            Stmt::While { condition, body } => {
                self.check_condition(scope, condition)?;
                self.check_block(scope, body, returns)
            }

            Stmt::Return(value) => {
                let value_ty = self.check_expr(scope, value)?;
                require_assignable(returns, value_ty, Some(value.offset))
            }
        }
    }

    fn check_condition(&self, scope: &mut TypeScope, condition: &mut Expr) -> Result<(), AnalysisError> {
        let ty = self.check_expr(scope, condition)?;
        require_assignable(Type::Boolean, ty, Some(condition.offset))
    }

    /// Check statements inside a fresh frame.
    fn check_block(&self, scope: &mut TypeScope, block: &mut [Stmt], returns: Type) -> Result<(), AnalysisError> {
        scope.push_frame();
        let result = block
            .iter_mut()
            .try_for_each(|stmt| self.check_statement(scope, stmt, returns));
        scope.pop_frame();
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::{analyze, AnalysisError};
    use crate::parser::ast::*;
    use crate::parser::parse::Parser;

    fn check_main(body: &str) -> Result<Source, AnalysisError> {
        let source = format!("FUN main ( ) : Integer DO\n{body}\nRETURN 0 ;\nEND");
        let mut program = Parser::new(&source).unwrap().parse_source().unwrap();
        analyze(&mut program)?;
        Ok(program)
    }

    #[test]
    fn test_declaration_infers_type() {
        let program = check_main("LET x = 1 ; LET y : Integer = x ;").unwrap();
        match &program.functions[0].body[1] {
            Stmt::Declaration { value: Some(value), .. } => assert_eq!(value.ty, Some(Type::Integer)),
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_checks_initializer() {
        assert!(matches!(
            check_main("LET x : Integer = \"one\" ;"),
            Err(AnalysisError::TypeMismatch {
                expected: Type::Integer,
                found: Type::String,
                ..
            })
        ));
        assert!(matches!(
            check_main("LET x : Real ;"),
            Err(AnalysisError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_redeclaration_in_same_frame() {
        assert!(matches!(
            check_main("LET x = 1 ; LET x = 2 ;"),
            Err(AnalysisError::AlreadyDefined { .. })
        ));
        assert!(check_main("LET x = 1 ; WHILE FALSE DO LET x = 2 ; END").is_ok());
    }

    #[test]
    fn test_assignment() {
        assert!(check_main("LET x = 1 ; x = 2 ;").is_ok());
        assert!(check_main("LET x = 1 ; x = 2.0 ;").is_err());
        assert!(matches!(
            check_main("1 = 2 ;"),
            Err(AnalysisError::InvalidAssignmentTarget { .. })
        ));
    }

    #[test]
    fn test_assignment_to_immutable_global() {
        let source = "VAL limit : Integer = 3 ; VAR count : Integer = 0 ; FUN main ( ) DO count = limit ; limit = 4 ; END";
        let mut program = Parser::new(source).unwrap().parse_source().unwrap();
        assert!(matches!(
            analyze(&mut program),
            Err(AnalysisError::ImmutableAssignment { ref name, offset: 84 }) if name == "limit"
        ));
    }

    #[test]
    fn test_if_rules() {
        assert!(check_main("IF TRUE DO print ( 1 ) ; END").is_ok());
        assert!(matches!(
            check_main("IF 1 DO print ( 1 ) ; END"),
            Err(AnalysisError::TypeMismatch { expected: Type::Boolean, .. })
        ));
        assert!(matches!(
            check_main("IF TRUE DO ELSE print ( 1 ) ; END"),
            Err(AnalysisError::EmptyThenBranch { .. })
        ));
    }

    #[test]
    fn test_branch_locals_do_not_leak() {
        assert!(matches!(
            check_main("IF TRUE DO LET y = 1 ; END print ( y ) ;"),
            Err(AnalysisError::UndefinedVariable { .. })
        ));
        assert!(matches!(
            check_main("WHILE FALSE DO LET y = 1 ; END y = 2 ;"),
            Err(AnalysisError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_switch_case_types() {
        assert!(check_main("SWITCH 1 CASE 1 : print ( 1 ) ; DEFAULT END").is_ok());
        assert!(matches!(
            check_main("SWITCH 1 CASE 'a' : DEFAULT END"),
            Err(AnalysisError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_nested_return_checked() {
        assert!(matches!(
            check_main("WHILE TRUE DO RETURN \"done\" ; END"),
            Err(AnalysisError::TypeMismatch {
                expected: Type::Integer,
                found: Type::String,
                ..
            })
        ));
    }
}
