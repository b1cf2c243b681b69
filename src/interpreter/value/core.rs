use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::Type,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::function::Func},
};

/// Shared, mutable array storage. Every binding holding the same array sees
/// in-place updates made through any of them.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// Values are produced by evaluating expressions and are stored in scopes,
/// array slots and closure environments. Cloning a value is cheap for every
/// variant except `String`; arrays and functions clone the handle, not the
/// contents.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// An immutable string.
    String(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparisons and logical operators and required by `if`
    /// and `while` conditions.
    Bool(bool),
    /// A shared, growable array of values.
    Array(ArrayRef),
    /// A callable value.
    Function(Func),
    /// The result of statements and functions that produce nothing useful.
    Unit,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<Func> for Value {
    fn from(f: Func) -> Self {
        Self::Function(f)
    }
}

/// Arrays compare by contents and functions by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Function(a), Self::Function(b)) => a == b,
            (Self::Unit, Self::Unit) => true,
            _ => false,
        }
    }
}

impl Value {
    /// The dynamic type of the value.
    ///
    /// Functions report their full signature; parameters without an
    /// annotation appear as `Any`.
    ///
    /// # Example
    /// ```
    /// use tommy::{ast::Type, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::from(vec![Value::Unit]).runtime_type(), Type::Array);
    /// assert_eq!(Value::from("hi").runtime_type(), Type::String);
    /// ```
    #[must_use]
    pub fn runtime_type(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Int,
            Self::String(_) => Type::String,
            Self::Bool(_) => Type::Bool,
            Self::Array(_) => Type::Array,
            Self::Function(f) => f.signature(),
            Self::Unit => Type::Unit,
        }
    }

    /// Returns `true` if the value may be stored where `ty` is declared.
    #[must_use]
    pub fn conforms_to(&self, ty: &Type) -> bool {
        ty.accepts(&self.runtime_type())
    }

    /// Fails with `IncorrectType` unless the value conforms to `ty`.
    pub fn check_type(&self, ty: &Type, line: usize) -> EvalResult<()> {
        if self.conforms_to(ty) {
            Ok(())
        } else {
            Err(self.type_mismatch(ty.clone(), line))
        }
    }

    /// Builds the `IncorrectType` error reported when this value is used
    /// where `expected` was required.
    #[must_use]
    pub fn type_mismatch(&self, expected: Type, line: usize) -> RuntimeError {
        RuntimeError::IncorrectType { expected,
                                      found: self.runtime_type().to_string(),
                                      line }
    }

    /// Extracts an integer, or fails with `IncorrectType`.
    pub fn as_int(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(other.type_mismatch(Type::Int, line)),
        }
    }

    /// Extracts a boolean, or fails with `IncorrectType`.
    ///
    /// # Example
    /// ```
    /// use tommy::interpreter::value::core::Value;
    ///
    /// assert!(Value::Bool(true).as_bool(1).unwrap());
    /// assert!(Value::Integer(1).as_bool(1).is_err());
    /// ```
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(other.type_mismatch(Type::Bool, line)),
        }
    }

    /// Borrows the string contents, or fails with `IncorrectType`.
    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(other.type_mismatch(Type::String, line)),
        }
    }

    /// Returns the shared array handle, or fails with `IncorrectType`.
    pub fn as_array(&self, line: usize) -> EvalResult<&ArrayRef> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(other.type_mismatch(Type::Array, line)),
        }
    }

    /// Returns the callable, or fails with `IncorrectType`.
    pub fn as_function(&self, line: usize) -> EvalResult<&Func> {
        match self {
            Self::Function(f) => Ok(f),
            other => Err(other.type_mismatch(Type::function(Vec::new(), Type::Any), line)),
        }
    }
}

/// The textual form used by `print` and `str`.
///
/// Strings are written raw, without quotes or escapes, including when they are
/// nested inside arrays.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (index, item) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
            Self::Function(func) => write!(f, "{func}"),
            Self::Unit => write!(f, "unit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn textual_forms() {
        let nested = Value::from(vec![Value::from(1), Value::from("a"), Value::from(vec![])]);

        assert_eq!(nested.to_string(), "[1, a, []]");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Unit.to_string(), "unit");
        assert_eq!(Value::from(-7).to_string(), "-7");
    }

    #[test]
    fn arrays_compare_by_contents() {
        assert_eq!(Value::from(vec![Value::from(1)]), Value::from(vec![Value::from(1)]));
        assert_ne!(Value::from(vec![Value::from(1)]), Value::from(vec![Value::from(2)]));
        assert_ne!(Value::from(1), Value::from("1"));
    }

    #[test]
    fn aliases_share_storage() {
        let original = Value::from(vec![]);
        let alias = original.clone();

        alias.as_array(1).unwrap().borrow_mut().push(Value::Unit);

        assert_eq!(original.as_array(1).unwrap().borrow().len(), 1);
    }

    #[test]
    fn mismatch_reports_found_type() {
        let err = Value::from("x").as_int(4).unwrap_err();

        assert!(matches!(err,
                         RuntimeError::IncorrectType { expected: Type::Int,
                                                       ref found,
                                                       line: 4 } if found == "String"));
    }
}
