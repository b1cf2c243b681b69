/// Built-in function table.
///
/// Declares the host functions available to every program together with
/// their parameter and result types.
pub mod builtin;
/// The `print` function implementation.
///
/// Writes a value's textual form to the context's output, without a newline.
pub mod print;

pub mod core;
