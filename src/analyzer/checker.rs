// Analyzer state, assignability rules and top-level (global/function) checks

use crate::analyzer::errors::AnalysisError;
use crate::memory::Scope;
use crate::parser::ast::*;

/// What the analyzer knows about a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableType {
    pub ty: Type,
    pub mutable: bool,
}

/// Scope holding static bindings: variable types and function signatures.
pub type TypeScope = Scope<VariableType, Signature>;

/// Fail unless a value of type `ty` may be stored where `target` is expected.
pub fn require_assignable(target: Type, ty: Type, offset: Option<usize>) -> Result<(), AnalysisError> {
    if target.accepts(ty) {
        Ok(())
    } else {
        Err(AnalysisError::TypeMismatch {
            expected: target,
            found: ty,
            offset,
        })
    }
}

pub(crate) fn resolve_type(name: &str, offset: Option<usize>) -> Result<Type, AnalysisError> {
    Type::from_name(name).ok_or_else(|| AnalysisError::UnknownType {
        name: name.to_string(),
        offset,
    })
}

/// Static type checker.
///
/// Walks a [`Source`] once, filling in `Expr::ty`, `Global::ty` and
/// `Function::signature`. The scope is created per run and passed down
/// explicitly, so one `Analyzer` can check any number of programs.
#[derive(Debug, Default)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Analyzer
    }

    /// Root scope with the built-in functions.
    pub fn root_scope() -> TypeScope {
        let mut scope = TypeScope::new();
        scope.define_function(
            "print",
            1,
            Signature {
                parameters: vec![Type::Any],
                returns: Type::Nil,
                jvm_name: "System.out.println".to_string(),
            },
        );
        scope.define_function(
            "logarithm",
            1,
            Signature {
                parameters: vec![Type::Decimal],
                returns: Type::Decimal,
                jvm_name: "Math.log".to_string(),
            },
        );
        scope
    }

    /// Check a whole program.
    #[tracing::instrument(skip_all)]
    pub fn analyze(&self, source: &mut Source) -> Result<(), AnalysisError> {
        let mut scope = Self::root_scope();

        for global in &mut source.globals {
            self.check_global(&mut scope, global)?;
        }

        // Signatures first so bodies can call functions defined later.
        let signatures = source
            .functions
            .iter_mut()
            .map(|function| self.declare_function(&mut scope, function))
            .collect::<Result<Vec<_>, _>>()?;
        for (function, signature) in source.functions.iter_mut().zip(&signatures) {
            self.check_function(&mut scope, function, signature)?;
        }

        if scope.lookup_function("main", 0).is_none() {
            return Err(AnalysisError::NoMainFunction);
        }

        tracing::debug!(
            globals = source.globals.len(),
            functions = source.functions.len(),
            "analysis passed"
        );
        Ok(())
    }

    pub(crate) fn check_global(&self, scope: &mut TypeScope, global: &mut Global) -> Result<(), AnalysisError> {
        let ty = resolve_type(&global.type_name, Some(global.offset))?;

        if scope.defines_variable_here(&global.name) {
            return Err(AnalysisError::AlreadyDefined {
                name: global.name.clone(),
                offset: Some(global.offset),
            });
        }

        if let Some(value) = &mut global.value {
            // List literals take their element type from the declaration.
            if matches!(value.kind, ExprKind::List(_)) {
                value.ty = Some(ty);
            }
            let value_ty = self.check_expr(scope, value)?;
            require_assignable(ty, value_ty, Some(value.offset))?;
        }

        scope.define_variable(
            global.name.clone(),
            VariableType {
                ty,
                mutable: global.mutable,
            },
        );
        global.ty = Some(ty);
        Ok(())
    }

    fn declare_function(&self, scope: &mut TypeScope, function: &mut Function) -> Result<Signature, AnalysisError> {
        let offset = Some(function.offset);
        let parameters = function
            .parameter_types
            .iter()
            .map(|name| resolve_type(name, offset))
            .collect::<Result<Vec<_>, _>>()?;
        let returns = match &function.return_type {
            Some(name) => resolve_type(name, offset)?,
            None => Type::Nil,
        };

        let arity = function.parameters.len();
        if scope.defines_function_here(&function.name, arity) {
            return Err(AnalysisError::AlreadyDefined {
                name: format!("{}/{}", function.name, arity),
                offset,
            });
        }

        let signature = Signature {
            parameters,
            returns,
            jvm_name: function.name.clone(),
        };
        scope.define_function(function.name.clone(), arity, signature.clone());
        function.signature = Some(signature.clone());
        Ok(signature)
    }

    fn check_function(
        &self,
        scope: &mut TypeScope,
        function: &mut Function,
        signature: &Signature,
    ) -> Result<(), AnalysisError> {
        tracing::trace!(function = %function.name, "checking function body");
        scope.push_frame();
        let result = self.check_function_body(scope, function, signature);
        scope.pop_frame();
        result
    }

    fn check_function_body(
        &self,
        scope: &mut TypeScope,
        function: &mut Function,
        signature: &Signature,
    ) -> Result<(), AnalysisError> {
        for (name, ty) in function.parameters.iter().zip(&signature.parameters) {
            if scope.defines_variable_here(name) {
                return Err(AnalysisError::AlreadyDefined {
                    name: name.clone(),
                    offset: Some(function.offset),
                });
            }
            scope.define_variable(
                name.clone(),
                VariableType {
                    ty: *ty,
                    mutable: true,
                },
            );
        }

        for stmt in &mut function.body {
            self.check_statement(scope, stmt, signature.returns)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_assignable() {
        assert!(require_assignable(Type::Integer, Type::Integer, None).is_ok());
        assert!(matches!(
            require_assignable(Type::Integer, Type::String, Some(3)),
            Err(AnalysisError::TypeMismatch {
                expected: Type::Integer,
                found: Type::String,
                offset: Some(3),
            })
        ));
        for ty in Type::ALL {
            assert!(require_assignable(Type::Any, ty, None).is_ok());
            assert!(require_assignable(Type::Comparable, ty, None).is_ok());
        }
    }

    #[test]
    fn test_resolve_type() {
        assert_eq!(resolve_type("Decimal", None), Ok(Type::Decimal));
        assert!(matches!(
            resolve_type("Float", Some(0)),
            Err(AnalysisError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_root_scope_builtins() {
        let scope = Analyzer::root_scope();
        assert_eq!(
            scope.lookup_function("print", 1).map(|s| s.returns),
            Some(Type::Nil)
        );
        assert_eq!(
            scope.lookup_function("logarithm", 1).map(|s| s.parameters.clone()),
            Some(vec![Type::Decimal])
        );
        assert_eq!(
            scope.lookup_function("print", 1).map(|s| s.jvm_name.as_str()),
            Some("System.out.println")
        );
    }
}
