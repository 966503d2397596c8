//! `WHILE` loop execution.
//!
//! Each iteration runs the body in a fresh frame, so declarations made in one
//! iteration are gone before the condition is evaluated again. A `RETURN` in
//! the body ends the loop and is handed to the caller unchanged.

use crate::interpreter::engine::{ControlFlow, Env, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, Stmt};

impl Interpreter {
    pub(crate) fn execute_while(
        &mut self,
        env: &mut Env<'_>,
        condition: &Expr,
        body: &[Stmt],
    ) -> Result<ControlFlow, RuntimeError> {
        while self.evaluate_condition(env, condition)? {
            if let ControlFlow::Return(value) = self.execute_block(env, body)? {
                return Ok(ControlFlow::Return(value));
            }
        }
        Ok(ControlFlow::Normal)
    }
}
