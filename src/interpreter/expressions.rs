//! Expression evaluation
//!
//! [`Interpreter::evaluate`] dispatches on the expression kind; the operator
//! and place logic lives in the `ops` submodules.

use crate::interpreter::engine::{Env, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::{Expr, ExprKind, Literal};

impl Interpreter {
    pub(crate) fn evaluate(&mut self, env: &mut Env<'_>, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal_value(literal)),

            ExprKind::Group(inner) => self.evaluate(env, inner),

            ExprKind::Binary { op, left, right } => self.evaluate_binary(env, *op, left, right, expr.offset),

            ExprKind::Access { name, index } => self.evaluate_access(env, name, index.as_deref(), expr.offset),

            ExprKind::Call { name, args } => {
                let callee = env.lookup_function(name, args.len()).copied().ok_or_else(|| {
                    RuntimeError::UndefinedFunction {
                        name: name.clone(),
                        arity: args.len(),
                        offset: expr.offset,
                    }
                })?;
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(env, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call(env, callee, values, expr.offset)
            }

            ExprKind::List(elements) => {
                let values = elements
                    .iter()
                    .map(|element| self.evaluate(env, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Integer(n) => Value::Integer(n.clone()),
        Literal::Decimal(d) => Value::Decimal(d.clone()),
        Literal::Character(c) => Value::Character(*c),
        Literal::String(s) => Value::String(s.clone()),
    }
}
