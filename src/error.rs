/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors are returned as values; no partial AST is produced.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a program executes,
/// together with the statement-context wrapper used for diagnostics.
pub mod runtime_error;
/// Static type inference errors.
pub mod type_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use type_error::TypeError;
