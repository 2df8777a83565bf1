/// Numeric conversion helpers.
///
/// Safe conversions between integer and floating-point types that fail instead
/// of silently losing data, plus index validation.
pub mod num;
/// Native stack growth for deep recursion.
pub mod stack;
