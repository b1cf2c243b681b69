/// Core evaluation logic and context management.
///
/// Contains the `Context` that owns the global scope and the output sink, the
/// `ControlSignal` threaded through statement execution, and the program entry
/// point.
pub mod core;

/// Lexical scopes.
///
/// Parent-linked, reference-counted binding frames shared between active
/// blocks and the closures created in them.
pub mod scope;

/// Expression evaluation.
///
/// Literals, variables, calls, indexing and lambda creation.
pub mod expression;

/// Statement execution.
///
/// Definitions, assignments, conditionals, loops and `return`.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Checked integer arithmetic, string concatenation, comparisons and the
/// short-circuiting logical operators.
pub mod binary;

/// Prefix operator evaluation logic.
pub mod unary;

/// Function evaluation.
///
/// The single call path for closures and built-ins, and the built-in table.
pub mod function;

/// Functions every program starts with, defined in the language itself.
pub mod prelude;
