use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, ControlSignal, EvalResult},
        value::{
            core::Value,
            function::{Closure, ClosureBody, Func},
        },
    },
};

/// Fails with `IncorrectArgumentCount` unless `found` matches the arity of
/// `func`.
pub fn check_arity(func: &Func, found: usize, line: usize) -> EvalResult<()> {
    let expected = func.arity();
    if expected == found {
        Ok(())
    } else {
        Err(RuntimeError::IncorrectArgumentCount { callee: func.name().to_string(),
                                                   expected,
                                                   found,
                                                   line })
    }
}

impl Context {
    /// Calls a function value with evaluated arguments.
    ///
    /// This is the single dispatch point for every kind of callable. The
    /// arity is checked first. Built-ins then have their arguments checked
    /// against their parameter types and run with this context's output.
    /// Closures run in a new child of the scope they captured, never of the
    /// caller's scope.
    ///
    /// # Parameters
    /// - `func`: The callee.
    /// - `args`: Argument values, in parameter order.
    /// - `line`: Line number of the call, used for argument errors.
    ///
    /// # Returns
    /// The value of a `return` statement, the value of a lambda's body
    /// expression, or `unit` when a function body ends without returning.
    ///
    /// # Limits
    /// Each script call nests host stack frames and there is no depth limit.
    /// Unbounded recursion in a script overflows the host stack and aborts
    /// the process; it is not reported as a `RuntimeError`.
    #[tracing::instrument(level = "trace", skip_all, fields(function = %func.name(), line = line))]
    pub fn call_function(&mut self,
                         func: &Func,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        check_arity(func, args.len(), line)?;

        match func {
            Func::Builtin(def) => {
                for (arg, ty) in args.iter().zip(def.params) {
                    arg.check_type(ty, line)?;
                }
                (def.func)(&args, &mut *self.output, line)
            },
            Func::Closure(closure) => self.call_closure(closure, args, line),
        }
    }

    fn call_closure(&mut self,
                    closure: &Closure,
                    args: Vec<Value>,
                    line: usize)
                    -> EvalResult<Value> {
        let frame = closure.scope.child();
        for ((name, ty), value) in closure.params().zip(args) {
            value.check_type(ty, line)?;
            frame.define(name, value, line)?;
        }

        match &closure.body {
            ClosureBody::Expr(lambda) => self.eval(&lambda.body, &frame),
            ClosureBody::Block(def) => match self.exec_block(&def.body, &frame)? {
                ControlSignal::Return { value, .. } => Ok(value),
                ControlSignal::Normal => Ok(Value::Unit),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::Type,
        interpreter::{evaluator::function::builtin::lookup_builtin, lexer::tokenize,
                      parser::core::parse_expression},
    };

    fn context() -> Context {
        Context::with_output(Box::new(std::io::sink()))
    }

    #[test]
    fn builtin_arguments_are_type_checked() {
        let Some(len) = lookup_builtin("len") else {
            panic!("len is registered");
        };
        let err = context().call_function(&Func::Builtin(len), vec![Value::from(3)], 9)
                           .unwrap_err();

        assert!(matches!(err, RuntimeError::IncorrectType { expected: Type::Array, line: 9, .. }));
    }

    #[test]
    fn arity_mismatch_names_the_callee() {
        let Some(push) = lookup_builtin("push") else {
            panic!("push is registered");
        };
        let err = context().call_function(&Func::Builtin(push), vec![], 1)
                           .unwrap_err();

        assert!(matches!(err,
                         RuntimeError::IncorrectArgumentCount { ref callee,
                                                                expected: 2,
                                                                found: 0,
                                                                .. } if callee == "push"));
    }

    #[test]
    fn lambda_runs_in_captured_scope() {
        let mut context = context();
        let globals = context.globals().clone();
        globals.define("k", Value::from(10), 1).unwrap();

        let tokens = tokenize(r"\x -> x + k").unwrap();
        let lambda = context.eval(&parse_expression(&mut tokens.iter().peekable()).unwrap(), &globals)
                            .unwrap();
        let Value::Function(func) = lambda else {
            panic!("expected a function value");
        };

        assert_eq!(context.call_function(&func, vec![Value::from(5)], 1).unwrap(),
                   Value::from(15));
    }
}
