use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDef, Lambda, Type},
    interpreter::evaluator::{function::builtin::BuiltinDef, scope::Scope},
};

static UNTYPED: Type = Type::Any;

/// A callable value.
///
/// User functions, lambdas and built-ins all go through the same call path:
/// the caller checks [`Func::arity`] and then dispatches on the variant.
#[derive(Debug, Clone)]
pub enum Func {
    /// A function written in the language, with its captured scope.
    Closure(Rc<Closure>),
    /// A host function from the built-in table.
    Builtin(&'static BuiltinDef),
}

/// The code a closure runs.
#[derive(Debug, Clone)]
pub enum ClosureBody {
    /// A named definition with typed parameters and a statement body.
    Block(Rc<FunctionDef>),
    /// A lambda whose body is a single expression.
    Expr(Rc<Lambda>),
}

/// A function value together with the scope it was created in.
///
/// The captured scope is shared, not copied: assignments made to captured
/// bindings after the closure is created are visible when it runs.
pub struct Closure {
    /// What to run.
    pub body:  ClosureBody,
    /// The scope active where the function was defined.
    pub scope: Scope,
}

impl Closure {
    /// The declared name, if the closure came from a named definition.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.body {
            ClosureBody::Block(def) => Some(&def.name),
            ClosureBody::Expr(_) => None,
        }
    }

    /// Parameter names paired with their declared types. Lambda parameters
    /// are untyped and report `Any`.
    pub fn params(&self) -> Box<dyn Iterator<Item = (&str, &Type)> + '_> {
        match &self.body {
            ClosureBody::Block(def) => {
                Box::new(def.params.iter().map(|p| (p.name.as_str(), &p.ty)))
            },
            ClosureBody::Expr(lambda) => {
                Box::new(lambda.params.iter().map(|p| (p.as_str(), &UNTYPED)))
            },
        }
    }

    /// The number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        match &self.body {
            ClosureBody::Block(def) => def.params.len(),
            ClosureBody::Expr(lambda) => lambda.params.len(),
        }
    }

    /// The declared result type; `Any` for lambdas.
    #[must_use]
    pub fn return_type(&self) -> &Type {
        match &self.body {
            ClosureBody::Block(def) => &def.return_type,
            ClosureBody::Expr(_) => &UNTYPED,
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
         .field("name", &self.name())
         .field("arity", &self.arity())
         .finish_non_exhaustive()
    }
}

impl Func {
    /// The name used in diagnostics: the declared name, the built-in name, or
    /// `lambda`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Closure(closure) => closure.name().unwrap_or("lambda"),
            Self::Builtin(def) => def.name,
        }
    }

    /// The number of arguments a call must supply.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Closure(closure) => closure.arity(),
            Self::Builtin(def) => def.params.len(),
        }
    }

    /// The function type of the callable.
    ///
    /// # Example
    /// ```
    /// use tommy::{
    ///     ast::Type,
    ///     interpreter::{evaluator::function::builtin::lookup_builtin, value::function::Func},
    /// };
    ///
    /// let len = Func::Builtin(lookup_builtin("len").unwrap());
    /// assert_eq!(len.signature(), Type::function(vec![Type::Array], Type::Int));
    /// ```
    #[must_use]
    pub fn signature(&self) -> Type {
        match self {
            Self::Closure(closure) => {
                Type::function(closure.params().map(|(_, ty)| ty.clone()).collect(),
                               closure.return_type().clone())
            },
            Self::Builtin(def) => Type::function(def.params.to_vec(), def.return_type.clone()),
        }
    }
}

/// Functions are equal only to themselves.
impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closure(closure) => match closure.name() {
                Some(name) => write!(f, "<function {name}>"),
                None => write!(f, "<lambda>"),
            },
            Self::Builtin(def) => write!(f, "<builtin {}>", def.name),
        }
    }
}
