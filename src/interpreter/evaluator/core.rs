use std::io::{self, Write};

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        evaluator::{function::builtin::BUILTIN_TABLE, prelude, scope::Scope},
        value::{core::Value, function::Func},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// Every statement either completes normally or requests a return from the
/// innermost function call. Blocks and loops stop at the first `Return` and
/// hand it outward until a call consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlSignal {
    /// Continue with the next statement.
    Normal,
    /// Unwind to the enclosing call with a result.
    Return {
        /// The value handed to the caller.
        value: Value,
        /// Line of the `return` statement.
        line:  usize,
    },
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the global scope, into which the
/// built-ins and the prelude are installed at construction, and the sink that
/// program output is written to.
///
/// ## Usage
///
/// A `Context` is a session. It is created once and may execute any number of
/// programs; definitions made by one `execute` call are visible to the next.
///
/// Scopes are reference counted and never collected. A closure stored in the
/// scope it captured, which includes every named function, keeps that scope
/// alive through an `Rc` cycle, so such scopes are only released at process
/// exit.
///
/// ```
/// use tommy::{
///     interpreter::{evaluator::core::Context, value::core::Value},
///     parse,
/// };
///
/// let mut context = Context::new();
/// context.execute(&parse("let x = 40").unwrap()).unwrap();
/// context.execute(&parse("x = x + 2").unwrap()).unwrap();
///
/// assert_eq!(context.globals().lookup("x", 0).unwrap(), Value::Integer(42));
/// ```
pub struct Context {
    globals:           Scope,
    pub(crate) output: Box<dyn Write>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context that writes program output to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Creates a context that writes program output to `output`.
    ///
    /// The global scope starts with every built-in and prelude function
    /// defined.
    #[must_use]
    pub fn with_output(output: Box<dyn Write>) -> Self {
        let mut context = Self { globals: Scope::root(),
                                 output };

        for def in BUILTIN_TABLE {
            context.globals.bind(def.name, Value::Function(Func::Builtin(def)));
        }

        let globals = context.globals.clone();
        if let Err(err) = context.exec_block(&prelude::definitions(), &globals) {
            tracing::error!(%err, "failed to install the prelude");
        }
        tracing::debug!(builtins = BUILTIN_TABLE.len(),
                        names = ?globals.local_names(),
                        "global scope ready");

        context
    }

    /// The global scope of the session.
    #[must_use]
    pub const fn globals(&self) -> &Scope {
        &self.globals
    }

    /// Executes a program in the global scope.
    ///
    /// Statements run in order until one fails. Output is flushed before
    /// returning, whether or not execution succeeded.
    ///
    /// # Errors
    /// - Any runtime fault, wrapped with the statement that raised it.
    /// - `InvalidControlTransfer` if a `return` executes outside every
    ///   function call.
    /// - `Output` if flushing the output fails.
    pub fn execute(&mut self, program: &[Statement]) -> EvalResult<()> {
        tracing::debug!(statements = program.len(), "program started");

        let globals = self.globals.clone();
        let result = self.run_top_level(program, &globals);

        let last_line = program.last().map_or(0, Statement::line_number);
        let flushed = self.output
                          .flush()
                          .map_err(|err| RuntimeError::Output { details: err.to_string(),
                                                                line:    last_line, });

        match &result {
            Ok(()) => tracing::debug!("program finished"),
            Err(err) => tracing::debug!(%err, "program failed"),
        }

        result.and(flushed)
    }

    fn run_top_level(&mut self, program: &[Statement], globals: &Scope) -> EvalResult<()> {
        for statement in program {
            if let ControlSignal::Return { line, .. } = self.exec_statement(statement, globals)? {
                return Err(RuntimeError::InvalidControlTransfer { line }.in_statement(statement));
            }
        }
        Ok(())
    }
}
