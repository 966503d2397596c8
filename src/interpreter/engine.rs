// Execution engine for PLC programs

use crate::interpreter::builtins;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::terminal::Terminal;
use crate::memory::{FrameId, Scope, Value};
use crate::parser::ast::{Function, Global, Source};

/// How a statement finished.
///
/// `Return` carries the returned value up through enclosing blocks and loops
/// until the call boundary turns it into the call's result.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    Normal,
    Return(Value),
}

/// A runtime variable binding
#[derive(Debug, Clone)]
pub struct Variable {
    pub value: Value,
    pub mutable: bool,
}

/// Signature shared by all built-in functions.
pub type BuiltinFn = fn(&mut Terminal, Vec<Value>, usize) -> Result<Value, RuntimeError>;

/// Anything a call expression can invoke.
#[derive(Debug, Clone, Copy)]
pub enum Callable<'a> {
    Builtin { name: &'static str, call: BuiltinFn },
    /// A user function and the frame it was defined in.
    User { function: &'a Function, frame: FrameId },
}

/// Scope holding runtime bindings. `'a` is the lifetime of the program being run.
pub type Env<'a> = Scope<Variable, Callable<'a>>;

/// Nested user calls allowed before a run fails with
/// [`RuntimeError::CallDepthExceeded`].
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// The main interpreter that executes a PLC program
pub struct Interpreter {
    /// Destination of `print` output
    terminal: Terminal,

    /// Number of user function calls currently active
    call_depth: usize,

    max_call_depth: usize,
}

impl Interpreter {
    pub fn new(terminal: Terminal) -> Self {
        Interpreter {
            terminal,
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn into_terminal(self) -> Terminal {
        self.terminal
    }

    /// Root environment holding the built-in functions.
    pub fn root_env<'a>() -> Env<'a> {
        let mut env = Env::new();
        for (name, call) in builtins::BUILTINS {
            env.define_function(*name, 1, Callable::Builtin { name: *name, call: *call });
        }
        env
    }

    /// Evaluate the globals, register the functions and call `main/0`.
    ///
    /// Returns whatever `main` returns, or `NIL` if it finishes without a `RETURN`.
    #[tracing::instrument(skip_all)]
    pub fn run(&mut self, source: &Source) -> Result<Value, RuntimeError> {
        let mut env = Self::root_env();

        for global in &source.globals {
            self.define_global(&mut env, global)?;
        }

        for function in &source.functions {
            let arity = function.parameters.len();
            if env.defines_function_here(&function.name, arity) {
                return Err(RuntimeError::AlreadyDefined {
                    name: format!("{}/{}", function.name, arity),
                    offset: Some(function.offset),
                });
            }
            let frame = env.current();
            env.define_function(function.name.clone(), arity, Callable::User { function, frame });
        }

        let main = env
            .lookup_function("main", 0)
            .copied()
            .ok_or(RuntimeError::NoMainFunction)?;
        let result = self.call(&mut env, main, Vec::new(), 0)?;

        tracing::debug!(%result, "program finished");
        Ok(result)
    }

    fn define_global<'a>(&mut self, env: &mut Env<'a>, global: &Global) -> Result<(), RuntimeError> {
        let value = match &global.value {
            Some(expr) => self.evaluate(env, expr)?,
            None => Value::Nil,
        };

        if env.defines_variable_here(&global.name) {
            return Err(RuntimeError::AlreadyDefined {
                name: global.name.clone(),
                offset: Some(global.offset),
            });
        }
        env.define_variable(
            global.name.clone(),
            Variable {
                value,
                mutable: global.mutable,
            },
        );
        Ok(())
    }

    /// Invoke `callee` with already-evaluated arguments.
    pub(crate) fn call<'a>(
        &mut self,
        env: &mut Env<'a>,
        callee: Callable<'a>,
        args: Vec<Value>,
        offset: usize,
    ) -> Result<Value, RuntimeError> {
        let (function, frame) = match callee {
            Callable::Builtin { name, call } => {
                tracing::trace!(function = name, "builtin call");
                return call(&mut self.terminal, args, offset);
            }
            Callable::User { function, frame } => (function, frame),
        };

        if args.len() != function.parameters.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: function.name.clone(),
                expected: function.parameters.len(),
                got: args.len(),
                offset,
            });
        }

        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                limit: self.max_call_depth,
                offset,
            });
        }
        self.call_depth += 1;
        tracing::trace!(function = %function.name, depth = self.call_depth, "call");

        env.push_frame_under(frame);
        for (name, value) in function.parameters.iter().zip(args) {
            env.define_variable(
                name.clone(),
                Variable {
                    value,
                    mutable: true,
                },
            );
        }
        let flow = self.execute_statements(env, &function.body);
        env.pop_frame();
        self.call_depth -= 1;

        match flow? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Normal => Ok(Value::Nil),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Terminal::default())
    }
}
