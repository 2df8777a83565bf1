/// Assignment and compound assignment.
///
/// Writes to variables and subscripts, and rejects every other target.
pub mod assignment;
/// Arithmetic and comparison operators.
pub mod core;
/// Short-circuiting `and` and `or`.
pub mod logic;
