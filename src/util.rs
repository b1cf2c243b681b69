/// Numeric conversion helpers.
///
/// Conversions between the interpreter's `i64` integers and host sizes, and
/// the float-backed power operation. Each helper reports failure as a
/// `RuntimeError` carrying the source line instead of panicking or wrapping.
pub mod num;
