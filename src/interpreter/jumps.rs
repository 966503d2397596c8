//! `RETURN` and `SWITCH` execution.

use crate::interpreter::engine::{ControlFlow, Env, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Case, Expr};

impl Interpreter {
    pub(crate) fn execute_return(&mut self, env: &mut Env<'_>, value: &Expr) -> Result<ControlFlow, RuntimeError> {
        let value = self.evaluate(env, value)?;
        Ok(ControlFlow::Return(value))
    }

    /// Run the first case whose value equals the condition, else the default.
    ///
    /// The condition is evaluated once; case values are evaluated in order
    /// until one matches.
    pub(crate) fn execute_switch(
        &mut self,
        env: &mut Env<'_>,
        condition: &Expr,
        cases: &[Case],
    ) -> Result<ControlFlow, RuntimeError> {
        let switch_val = self.evaluate(env, condition)?;

        for case in cases {
            match &case.value {
                Some(value) => {
                    let case_val = self.evaluate(env, value)?;
                    if case_val == switch_val {
                        return self.execute_block(env, &case.body);
                    }
                }
                None => return self.execute_block(env, &case.body),
            }
        }

        Ok(ControlFlow::Normal)
    }
}
