//! Statement execution
//!
//! Adds `impl Interpreter` methods that run a single statement or a list of
//! them. Every statement returns a [`ControlFlow`]; a `Return` stops the
//! enclosing statement list and travels outward until [`Interpreter::call`]
//! collapses it into the call's value.
//!
//! `IF`/`ELSE` branches and `SWITCH` cases run through [`Interpreter::execute_block`],
//! which gives them a frame of their own.

use crate::interpreter::engine::{ControlFlow, Env, Interpreter, Variable};
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::{Expr, Stmt};

impl Interpreter {
    /// Run statements in the current frame until one returns.
    pub(crate) fn execute_statements(&mut self, env: &mut Env<'_>, stmts: &[Stmt]) -> Result<ControlFlow, RuntimeError> {
        for stmt in stmts {
            if let ControlFlow::Return(value) = self.execute_statement(env, stmt)? {
                return Ok(ControlFlow::Return(value));
            }
        }
        Ok(ControlFlow::Normal)
    }

    /// Run statements in a new frame nested in the current one.
    pub(crate) fn execute_block(&mut self, env: &mut Env<'_>, stmts: &[Stmt]) -> Result<ControlFlow, RuntimeError> {
        env.push_frame();
        let flow = self.execute_statements(env, stmts);
        env.pop_frame();
        flow
    }

    pub(crate) fn execute_statement(&mut self, env: &mut Env<'_>, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(env, expr)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Declaration { name, value, .. } => {
                self.execute_declaration(env, name, value.as_ref())?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Assignment { receiver, value } => {
                self.execute_assignment(env, receiver, value)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate_condition(env, condition)? {
                    self.execute_block(env, then_branch)
                } else {
                    self.execute_block(env, else_branch)
                }
            }

            Stmt::Switch { condition, cases } => self.execute_switch(env, condition, cases),

            Stmt::While { condition, body } => self.execute_while(env, condition, body),

            Stmt::Return(value) => self.execute_return(env, value),
        }
    }

    fn execute_declaration(&mut self, env: &mut Env<'_>, name: &str, value: Option<&Expr>) -> Result<(), RuntimeError> {
        let initial = match value {
            Some(expr) => self.evaluate(env, expr)?,
            None => Value::Nil,
        };

        if env.defines_variable_here(name) {
            return Err(RuntimeError::AlreadyDefined {
                name: name.to_string(),
                offset: value.map(|v| v.offset),
            });
        }
        env.define_variable(
            name,
            Variable {
                value: initial,
                mutable: true,
            },
        );
        Ok(())
    }

    /// Evaluate a condition that must produce a boolean.
    pub(crate) fn evaluate_condition(&mut self, env: &mut Env<'_>, condition: &Expr) -> Result<bool, RuntimeError> {
        let value = self.evaluate(env, condition)?;
        value
            .as_bool()
            .ok_or_else(|| RuntimeError::type_error("Boolean", &value, condition.offset))
    }
}
