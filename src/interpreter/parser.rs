/// Parser entry points.
///
/// Holds the `ParseResult` alias, the program entry point and the expression
/// entry point used by every other parser module.
pub mod core;

/// The binding-power expression engine.
///
/// Maps tokens to null and left denotations and folds operators according to
/// their precedence and associativity.
pub mod pratt;

/// Statement parsing.
///
/// Declarations, assignments, conditionals, loops, function definitions and
/// `return`.
pub mod statement;

/// Statement bodies terminated by a closing keyword.
pub mod block;

/// String literal decoding.
pub mod string;

/// Shared helpers: comma-separated lists, identifiers, type annotations and
/// token expectations.
pub mod utils;
