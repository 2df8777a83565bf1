/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, short-circuiting logic and assignments.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical `not`.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, statement and
/// block execution, and the control flow signals.
pub mod core;

/// Evaluation of counting for-loops.
///
/// Manages the loop frame, the private counter and the re-evaluated end
/// bound.
pub mod for_loop;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
