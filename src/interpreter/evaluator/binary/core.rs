use crate::{
    ast::{Expr, InfixOperator},
    interpreter::{
        evaluator::{
            binary::arithmetic::{checked, checked_division, compare},
            core::{Context, EvalResult},
            scope::Scope,
        },
        value::core::Value,
    },
    util::num::pow_truncated,
};

impl Context {
    /// Evaluates an infix expression.
    ///
    /// `and` and `or` evaluate their right operand only when the left one
    /// does not already decide the result. Every other operator evaluates
    /// both operands, left first, and applies [`Context::eval_binary`].
    pub(crate) fn eval_infix(&mut self,
                             left: &Expr,
                             op: InfixOperator,
                             right: &Expr,
                             scope: &Scope,
                             line: usize)
                             -> EvalResult<Value> {
        if matches!(op, InfixOperator::And | InfixOperator::Or) {
            return self.eval_short_circuit(op, left, right, scope, line);
        }

        let left = self.eval(left, scope)?;
        let right = self.eval(right, scope)?;
        Self::eval_binary(op, &left, &right, line)
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// Operands are checked against the operator's signature: arithmetic and
    /// comparisons take integers, `++` takes strings, `and` and `or` take
    /// booleans. A mismatch is an `IncorrectType` error naming the expected
    /// type.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use tommy::{
    ///     ast::InfixOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(InfixOperator::Add, &Value::Integer(3), &Value::Integer(4), 1);
    /// assert_eq!(sum.unwrap(), Value::Integer(7));
    ///
    /// let joined = Context::eval_binary(InfixOperator::Concat, &"a".into(), &"b".into(), 1);
    /// assert_eq!(joined.unwrap(), Value::from("ab"));
    /// ```
    pub fn eval_binary(op: InfixOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use InfixOperator::{
            Add, And, Concat, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
            NotEqual, Or, Pow, Sub,
        };

        match op {
            Add => checked(left, right, line, i64::checked_add),
            Sub => checked(left, right, line, i64::checked_sub),
            Mul => checked(left, right, line, i64::checked_mul),
            Div => checked_division(left, right, line, i64::checked_div),
            Mod => checked_division(left, right, line, i64::checked_rem),
            Pow => Ok(Value::Integer(pow_truncated(left.as_int(line)?, right.as_int(line)?))),

            Concat => {
                let mut joined = left.as_str(line)?.to_string();
                joined.push_str(right.as_str(line)?);
                Ok(Value::String(joined))
            },

            Equal => compare(left, right, line, i64::eq),
            NotEqual => compare(left, right, line, i64::ne),
            Less => compare(left, right, line, i64::lt),
            Greater => compare(left, right, line, i64::gt),
            LessEqual => compare(left, right, line, i64::le),
            GreaterEqual => compare(left, right, line, i64::ge),

            And => Ok(Value::Bool(left.as_bool(line)? && right.as_bool(line)?)),
            Or => Ok(Value::Bool(left.as_bool(line)? || right.as_bool(line)?)),
        }
    }
}
