use crate::{
    ast::{Expr, InfixOperator},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::Scope,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `and` or `or`, skipping the right operand when the left one
    /// decides the result.
    ///
    /// `false and x` is `false` and `true or x` is `true` without evaluating
    /// `x`, so any side effects or errors in `x` do not happen. When the right
    /// operand is evaluated it must be a boolean as well.
    pub(crate) fn eval_short_circuit(&mut self,
                                     op: InfixOperator,
                                     left: &Expr,
                                     right: &Expr,
                                     scope: &Scope,
                                     line: usize)
                                     -> EvalResult<Value> {
        let decided_by = matches!(op, InfixOperator::Or);

        if self.eval(left, scope)?.as_bool(line)? == decided_by {
            return Ok(Value::Bool(decided_by));
        }

        let right = self.eval(right, scope)?.as_bool(line)?;
        Ok(Value::Bool(right))
    }
}
