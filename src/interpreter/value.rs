/// The runtime value type.
///
/// Defines `Value`, its textual form, the conversions used by the evaluator to
/// check operand shapes, and conformance of values to declared types.
pub mod core;
/// Callable values.
///
/// Defines `Func`, the single representation shared by user closures, lambdas
/// and built-ins, together with the closure payload.
pub mod function;
