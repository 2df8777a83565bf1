/// String conversion and casts between kinds.
pub mod cast;
/// The `Value` enum, its constructors and the binding rule.
pub mod core;
/// User-defined and native function values.
pub mod function;
/// Value kinds and their binding policies.
pub mod kind;
/// Arithmetic, comparison and equality.
pub mod operators;
/// Property access, subscripts and string and table methods.
pub mod property;
/// Tables and their hashable key projection.
pub mod table;
/// Freeing deeply nested values without deep recursion.
pub(crate) mod teardown;
