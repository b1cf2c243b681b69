use std::rc::Rc;

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::check_arity,
            scope::Scope,
        },
        value::{
            core::Value,
            function::{Closure, ClosureBody, Func},
        },
    },
    util::num::array_index,
};

impl Context {
    /// Evaluates an expression to a value.
    ///
    /// Operands and arguments are evaluated left to right. A call evaluates
    /// its callee like any other expression, so named functions, lambdas and
    /// built-ins are looked up in the same scope chain as variables.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `scope`: Scope used to resolve names.
    ///
    /// # Example
    /// ```
    /// use tommy::{
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         lexer::tokenize,
    ///         parser::core::parse_expression,
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let tokens = tokenize("len([1, 2, 3]) * 2").unwrap();
    /// let expr = parse_expression(&mut tokens.iter().peekable()).unwrap();
    ///
    /// let mut context = Context::new();
    /// let globals = context.globals().clone();
    ///
    /// assert_eq!(context.eval(&expr, &globals).unwrap(), Value::Integer(6));
    /// ```
    pub fn eval(&mut self, expr: &Expr, scope: &Scope) -> EvalResult<Value> {
        match expr {
            Expr::Var { name, line } => scope.lookup(name, *line),
            Expr::Prefix { op, operand, line } => {
                let value = self.eval(operand, scope)?;
                Self::eval_prefix(*op, &value, *line)
            },
            Expr::Infix { left, op, right, line } => self.eval_infix(left, *op, right, scope, *line),
            Expr::FunCall { callee,
                            arguments,
                            line, } => self.eval_call(callee, arguments, scope, *line),
            Expr::ArrayAccess { array, index, line } => {
                let array = self.eval(array, scope)?;
                let index = self.eval(index, scope)?;
                let items = array.as_array(*line)?.borrow();
                let position = array_index(index.as_int(*line)?, items.len(), *line)?;
                Ok(items[position].clone())
            },
            Expr::LInt { value, .. } => Ok(Value::Integer(*value)),
            Expr::LString { value, .. } => Ok(Value::String(value.clone())),
            Expr::LBool { value, .. } => Ok(Value::Bool(*value)),
            Expr::LUnit { .. } => Ok(Value::Unit),
            Expr::LArray { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element, scope))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::LFunction { lambda, .. } => {
                let closure = Closure { body:  ClosureBody::Expr(Rc::clone(lambda)),
                                        scope: scope.clone(), };
                Ok(Value::Function(Func::Closure(Rc::new(closure))))
            },
        }
    }

    /// Evaluates `callee(arguments...)`.
    ///
    /// The callee must be a function and the argument count must match its
    /// arity; both are checked before any argument is evaluated.
    fn eval_call(&mut self,
                 callee: &Expr,
                 arguments: &[Expr],
                 scope: &Scope,
                 line: usize)
                 -> EvalResult<Value> {
        let callee = self.eval(callee, scope)?;
        let func = callee.as_function(line)?;
        check_arity(func, arguments.len(), line)?;

        let args = arguments.iter()
                            .map(|argument| self.eval(argument, scope))
                            .collect::<EvalResult<Vec<_>>>()?;

        self.call_function(func, args, line)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::RuntimeError,
        interpreter::{lexer::tokenize, parser::core::parse_expression},
    };

    fn eval(source: &str) -> EvalResult<Value> {
        let tokens = tokenize(source).unwrap();
        let expr = parse_expression(&mut tokens.iter().peekable()).unwrap();
        let mut context = Context::with_output(Box::new(std::io::sink()));
        let globals = context.globals().clone();
        context.eval(&expr, &globals)
    }

    #[test]
    fn literals_and_indexing() {
        assert_eq!(eval("[10, 20, 30][1]").unwrap(), Value::from(20));
        assert_eq!(eval(r#""tab\there""#).unwrap(), Value::from("tab\there"));
        assert_eq!(eval("unit").unwrap(), Value::Unit);
    }

    #[test]
    fn index_out_of_range() {
        assert!(matches!(eval("[1][1]"),
                         Err(RuntimeError::ArrayIndexOutOfRange { index: 1, length: 1, .. })));
        assert!(matches!(eval("[1][-1]"),
                         Err(RuntimeError::ArrayIndexOutOfRange { index: -1, .. })));
    }

    #[test]
    fn index_needs_array_and_int() {
        assert!(matches!(eval("5[0]"), Err(RuntimeError::IncorrectType { .. })));
        assert!(matches!(eval("[1][true]"), Err(RuntimeError::IncorrectType { .. })));
    }

    #[test]
    fn immediate_lambda_call() {
        assert_eq!(eval(r"(\x, y -> x * y)(6, 7)").unwrap(), Value::from(42));
    }

    #[test]
    fn calling_a_non_function() {
        assert!(matches!(eval("3(1)"), Err(RuntimeError::IncorrectType { .. })));
    }

    #[test]
    fn arity_is_checked_before_arguments() {
        assert!(matches!(eval("len(undefined_name, 2)"),
                         Err(RuntimeError::IncorrectArgumentCount { expected: 1,
                                                                    found: 2,
                                                                    .. })));
    }

    #[test]
    fn unknown_variable() {
        assert!(matches!(eval("nope"),
                         Err(RuntimeError::UndefinedVariable { ref name, .. }) if name == "nope"));
    }
}
