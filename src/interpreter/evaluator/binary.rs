/// Operator dispatch.
pub mod core;
/// Checked integer arithmetic and integer comparisons.
pub mod arithmetic;
/// Short-circuiting `and` and `or`.
pub mod logic;
