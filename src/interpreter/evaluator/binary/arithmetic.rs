use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Applies a checked integer operation.
///
/// Both operands must be integers. A `None` from `op` means the exact result
/// does not fit in an `i64` and is reported as `Overflow`.
pub(super) fn checked(left: &Value,
                      right: &Value,
                      line: usize,
                      op: fn(i64, i64) -> Option<i64>)
                      -> EvalResult<Value> {
    let (a, b) = (left.as_int(line)?, right.as_int(line)?);
    op(a, b).map(Value::Integer)
            .ok_or(RuntimeError::Overflow { line })
}

/// Like [`checked`], but a zero divisor is `DivisionByZero` rather than
/// `Overflow`.
pub(super) fn checked_division(left: &Value,
                               right: &Value,
                               line: usize,
                               op: fn(i64, i64) -> Option<i64>)
                               -> EvalResult<Value> {
    let (a, b) = (left.as_int(line)?, right.as_int(line)?);
    if b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    op(a, b).map(Value::Integer)
            .ok_or(RuntimeError::Overflow { line })
}

/// Compares two integers.
pub(super) fn compare(left: &Value,
                      right: &Value,
                      line: usize,
                      op: fn(&i64, &i64) -> bool)
                      -> EvalResult<Value> {
    let (a, b) = (left.as_int(line)?, right.as_int(line)?);
    Ok(Value::Bool(op(&a, &b)))
}
