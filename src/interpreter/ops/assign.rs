//! Assignment to variables and list elements
//!
//! The receiver of an assignment must be an access expression. The binding is
//! resolved through the scope chain, so an assignment inside a block or loop
//! updates the frame that owns the variable. A list element may not be given
//! a value that reaches the list itself.

use super::access::checked_index;
use crate::interpreter::engine::{Env, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::{Expr, ExprKind};

impl Interpreter {
    pub(crate) fn execute_assignment(
        &mut self,
        env: &mut Env<'_>,
        receiver: &Expr,
        value: &Expr,
    ) -> Result<(), RuntimeError> {
        let ExprKind::Access { name, index } = &receiver.kind else {
            return Err(RuntimeError::InvalidAssignmentTarget {
                offset: receiver.offset,
            });
        };

        match env.lookup_variable(name) {
            None => {
                return Err(RuntimeError::UndefinedVariable {
                    name: name.clone(),
                    offset: receiver.offset,
                })
            }
            Some(variable) if !variable.mutable => {
                return Err(RuntimeError::ImmutableAssignment {
                    name: name.clone(),
                    offset: receiver.offset,
                })
            }
            Some(_) => {}
        }

        let position = match index {
            Some(index) => Some((self.evaluate_index(env, index)?, index.offset)),
            None => None,
        };
        let new_value = self.evaluate(env, value)?;

        // Evaluating the value may have run arbitrary code, so resolve again
        let variable = env
            .lookup_variable_mut(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.clone(),
                offset: receiver.offset,
            })?;

        let Some((position, index_offset)) = position else {
            variable.value = new_value;
            return Ok(());
        };

        match &variable.value {
            Value::List(elements) => {
                if new_value.reaches_list(elements) {
                    return Err(RuntimeError::CyclicList { offset: value.offset });
                }
                let mut elements = elements.borrow_mut();
                let i = checked_index(&position, elements.len(), index_offset)?;
                elements[i] = new_value;
                Ok(())
            }
            other => Err(RuntimeError::type_error("List", other, receiver.offset)),
        }
    }
}
