use std::io::Write;

use crate::{
    ast::Type,
    interpreter::{
        evaluator::{core::EvalResult, function::print},
        value::core::Value,
    },
    util::num::usize_to_i64_checked,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated arguments, the output sink of the calling
/// context and the line number of the call. Arity and parameter types have
/// already been checked against its [`BuiltinDef`] when it runs.
pub type BuiltinFn = fn(&[Value], &mut dyn Write, usize) -> EvalResult<Value>;

/// Metadata for one host function.
#[derive(Debug)]
pub struct BuiltinDef {
    /// The name the function is bound to in the global scope.
    pub name:        &'static str,
    /// Parameter types, in order. Their count is the arity.
    pub params:      &'static [Type],
    /// The declared result type.
    pub return_type: Type,
    /// The implementation.
    pub func:        BuiltinFn,
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - a string name,
/// - the parameter types,
/// - the result type,
/// - a function pointer implementing the builtin.
///
/// The macro produces `BUILTIN_TABLE`, a static table of [`BuiltinDef`].
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:expr),* $(,)?],
                returns: $returns:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every built-in, in registration order.
        pub static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, params: &[$($param),*], return_type: $returns, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "print" => { params: [Type::Any],            returns: Type::Unit,   func: print::print },
    "str"   => { params: [Type::Any],            returns: Type::String, func: stringify },
    "len"   => { params: [Type::Array],          returns: Type::Int,    func: len },
    "push"  => { params: [Type::Array, Type::Any], returns: Type::Unit, func: push },
}

/// Finds a built-in by name.
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|def| def.name == name)
}

/// Returns the textual form of any value as a string.
///
/// # Example
/// ```
/// use tommy::interpreter::{evaluator::function::builtin::stringify, value::core::Value};
///
/// let s = stringify(&[Value::from(vec![Value::Integer(1), Value::Bool(true)])], &mut std::io::sink(), 1);
/// assert_eq!(s.unwrap(), Value::from("[1, true]"));
/// ```
pub fn stringify(args: &[Value], _: &mut dyn Write, _line: usize) -> EvalResult<Value> {
    Ok(Value::String(args[0].to_string()))
}

/// Returns the number of elements in an array.
pub fn len(args: &[Value], _: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let length = args[0].as_array(line)?.borrow().len();
    Ok(Value::Integer(usize_to_i64_checked(length, line)?))
}

/// Appends a value to an array in place.
///
/// Every binding that refers to the array observes the new element.
///
/// # Example
/// ```
/// use tommy::interpreter::{evaluator::function::builtin::push, value::core::Value};
///
/// let xs = Value::from(vec![]);
/// push(&[xs.clone(), Value::Integer(7)], &mut std::io::sink(), 1).unwrap();
///
/// assert_eq!(xs, Value::from(vec![Value::Integer(7)]));
/// ```
pub fn push(args: &[Value], _: &mut dyn Write, line: usize) -> EvalResult<Value> {
    args[0].as_array(line)?.borrow_mut().push(args[1].clone());
    Ok(Value::Unit)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn table_is_consistent() {
        let names: Vec<&str> = BUILTIN_TABLE.iter().map(|def| def.name).collect();
        assert_eq!(names, vec!["print", "str", "len", "push"]);
        assert_eq!(lookup_builtin("push").map(|def| def.params.len()), Some(2));
        assert!(lookup_builtin("println").is_none());
    }

    #[test]
    fn len_counts_elements() {
        let xs = Value::from(vec![Value::Unit, Value::Unit]);
        assert_eq!(len(&[xs], &mut std::io::sink(), 1).unwrap(), Value::Integer(2));
    }
}
