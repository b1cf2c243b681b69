use crate::ast::Expr;

/// A static type inference failure.
///
/// Raised only by [`crate::typechecker::infer`]; the interpreter never
/// produces it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeError {
    /// The sub-expression that failed to check.
    pub expr:    Expr,
    /// What went wrong.
    pub message: String,
    /// The source line of `expr`.
    pub line:    usize,
}

impl TypeError {
    pub(crate) fn new(expr: &Expr, message: impl Into<String>) -> Self {
        Self { expr:    expr.clone(),
               message: message.into(),
               line:    expr.line_number(), }
    }
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Type error on line {}: {} (in {})",
               self.line, self.message, self.expr)
    }
}

impl std::error::Error for TypeError {}
