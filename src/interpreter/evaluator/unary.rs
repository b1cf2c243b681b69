use crate::{
    ast::PrefixOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a prefix operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`: identity on integers.
    /// - `Negate`: checked integer negation; `-i64::MIN` is an `Overflow`.
    /// - `Not`: boolean negation.
    ///
    /// # Example
    /// ```
    /// use tommy::{
    ///     ast::PrefixOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_prefix(PrefixOperator::Negate, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Context::eval_prefix(PrefixOperator::Not, &Value::Bool(false), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    pub fn eval_prefix(op: PrefixOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            PrefixOperator::Plus => Ok(Value::Integer(value.as_int(line)?)),
            PrefixOperator::Negate => value.as_int(line)?
                                           .checked_neg()
                                           .map(Value::Integer)
                                           .ok_or(RuntimeError::Overflow { line }),
            PrefixOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }
}
