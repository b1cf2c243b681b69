use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Writes the textual form of a value to the output, without a newline.
///
/// Strings are written raw. The value is returned as `unit`.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `out`: The calling context's output sink.
/// - `line`: Line number for error reporting.
///
/// # Errors
/// `Output` if the sink rejects the write.
///
/// # Example
/// ```
/// use tommy::interpreter::{evaluator::function::print::print, value::core::Value};
///
/// let mut out = Vec::new();
/// let result = print(&[Value::from("hi")], &mut out, 1).unwrap();
///
/// assert_eq!(result, Value::Unit);
/// assert_eq!(out, b"hi");
/// ```
pub fn print(args: &[Value], out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    write!(out, "{}", args[0]).map_err(|err| RuntimeError::Output { details: err.to_string(),
                                                                   line })?;
    Ok(Value::Unit)
}
