/// Built-in functions seeded into the root frame.
///
/// Provides `print`, `input` and `table` as ordinary native function values.
pub mod builtin;

/// Function call evaluation.
///
/// Handles argument evaluation, arity checks, frame setup for closures, the
/// call depth limit, and calls on types.
pub mod core;
