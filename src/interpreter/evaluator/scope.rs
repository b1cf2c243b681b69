use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A lexical environment: local bindings plus an optional enclosing scope.
///
/// `Scope` is a cheap handle. Cloning it yields another reference to the same
/// frame, which is how closures keep their defining environment alive and
/// observe later changes to it.
///
/// Lookups walk outward through the parent chain. Definitions always land in
/// the local frame. Assignments update the frame that owns the name and never
/// create a shadowing binding.
#[derive(Clone)]
pub struct Scope(Rc<RefCell<Frame>>);

struct Frame {
    bindings: HashMap<String, Value>,
    parent:   Option<Scope>,
}

impl Scope {
    /// Creates a scope with no parent.
    #[must_use]
    pub fn root() -> Self {
        Self(Rc::new(RefCell::new(Frame { bindings: HashMap::new(),
                                          parent:   None, })))
    }

    /// Creates an empty scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Frame { bindings: HashMap::new(),
                                          parent:   Some(self.clone()), })))
    }

    /// Resolves `name` in this scope or the nearest ancestor that binds it.
    ///
    /// # Errors
    /// `UndefinedVariable` if no scope in the chain binds the name.
    ///
    /// # Example
    /// ```
    /// use tommy::interpreter::{evaluator::scope::Scope, value::core::Value};
    ///
    /// let root = Scope::root();
    /// root.define("x", Value::Integer(1), 1).unwrap();
    ///
    /// let inner = root.child();
    /// assert_eq!(inner.lookup("x", 2).unwrap(), Value::Integer(1));
    /// assert!(inner.lookup("y", 2).is_err());
    /// ```
    pub fn lookup(&self, name: &str, line: usize) -> EvalResult<Value> {
        let frame = self.0.borrow();
        if let Some(value) = frame.bindings.get(name) {
            return Ok(value.clone());
        }
        match &frame.parent {
            Some(parent) => parent.lookup(name, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Binds `name` in this scope.
    ///
    /// # Errors
    /// `RedefineVariable` if this scope already binds the name. Bindings in
    /// enclosing scopes do not count; they are shadowed.
    pub fn define(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let mut frame = self.0.borrow_mut();
        if frame.bindings.contains_key(name) {
            return Err(RuntimeError::RedefineVariable { name: name.to_string(),
                                                        line });
        }
        frame.bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Replaces the value of an existing binding in the scope that owns it.
    ///
    /// # Errors
    /// `UndefinedVariable` if no scope in the chain binds the name.
    ///
    /// # Example
    /// ```
    /// use tommy::interpreter::{evaluator::scope::Scope, value::core::Value};
    ///
    /// let root = Scope::root();
    /// root.define("x", Value::Integer(1), 1).unwrap();
    ///
    /// root.child().assign("x", Value::Integer(2), 2).unwrap();
    /// assert_eq!(root.lookup("x", 3).unwrap(), Value::Integer(2));
    /// ```
    pub fn assign(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let mut frame = self.0.borrow_mut();
        if let Some(slot) = frame.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &frame.parent {
            Some(parent) => parent.assign(name, value, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Binds `name` locally, replacing any existing local binding.
    ///
    /// Used by the host to install built-ins before any program runs.
    pub(crate) fn bind(&self, name: &str, value: Value) {
        self.0.borrow_mut().bindings.insert(name.to_string(), value);
    }

    /// Names bound directly in this scope, sorted.
    #[must_use]
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Prints only binding names. Values may hold closures that point back at
/// this scope.
impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
         .field("names", &self.local_names())
         .field("has_parent", &self.0.borrow().parent.is_some())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn define_rejects_local_duplicates_only() {
        let root = Scope::root();
        root.define("x", Value::from(1), 1).unwrap();

        assert!(matches!(root.define("x", Value::from(2), 2),
                         Err(RuntimeError::RedefineVariable { line: 2, .. })));

        let inner = root.child();
        inner.define("x", Value::from(3), 3).unwrap();
        assert_eq!(inner.lookup("x", 4).unwrap(), Value::from(3));
        assert_eq!(root.lookup("x", 4).unwrap(), Value::from(1));
    }

    #[test]
    fn assign_updates_owner_without_shadowing() {
        let root = Scope::root();
        root.define("n", Value::from(0), 1).unwrap();
        let inner = root.child();

        inner.assign("n", Value::from(5), 2).unwrap();

        assert_eq!(inner.local_names(), Vec::<String>::new());
        assert_eq!(root.lookup("n", 3).unwrap(), Value::from(5));
    }

    #[test]
    fn assign_to_unknown_name_fails() {
        let root = Scope::root();

        assert!(matches!(root.child().assign("ghost", Value::Unit, 7),
                         Err(RuntimeError::UndefinedVariable { line: 7, .. })));
    }

    #[test]
    fn clones_share_the_frame() {
        let scope = Scope::root();
        let handle = scope.clone();

        handle.define("shared", Value::Unit, 1).unwrap();

        assert_eq!(scope.local_names(), vec!["shared".to_string()]);
    }
}
