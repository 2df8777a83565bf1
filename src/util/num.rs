use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// Mixed integer/real arithmetic goes through this conversion, so
/// `9007199254740993 + 0.5` fails instead of silently rounding.
///
/// ## Errors
/// Returns `RuntimeError::LiteralTooLarge` if the value exceeds
/// `MAX_SAFE_U64_INT` in absolute value.
///
/// ## Example
/// ```
/// use tern::{
///     error::RuntimeError,
///     util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked},
/// };
///
/// assert_eq!(i64_to_f64_checked(42, 1).unwrap(), 42.0);
///
/// let err = i64_to_f64_checked(MAX_SAFE_I64_INT + 1, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooLarge { line: 3 }));
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64_checked(value: i64, line: usize) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    Ok(value as f64)
}

/// Returns the integer an `f64` represents exactly, if it is integral and
/// within the safe range.
///
/// ## Example
/// ```
/// use tern::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(3.0), Some(3));
/// assert_eq!(f64_to_i64_exact(-0.0), Some(0));
/// assert_eq!(f64_to_i64_exact(2.5), None);
/// assert_eq!(f64_to_i64_exact(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_I64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Converts a length to an `i64`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` for lengths beyond `i64::MAX`.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}

/// Validates `index` against a sequence of `length` elements.
///
/// ## Errors
/// Returns `RuntimeError::IndexOutOfBounds` for negative indices and indices
/// at or past the end.
///
/// ## Example
/// ```
/// use tern::{error::RuntimeError, util::num::checked_index};
///
/// assert_eq!(checked_index(2, 3, 1).unwrap(), 2);
/// assert!(matches!(checked_index(3, 3, 1),
///                  Err(RuntimeError::IndexOutOfBounds { index: 3, length: 3, line: 1 })));
/// assert!(checked_index(-1, 3, 1).is_err());
/// ```
pub fn checked_index(index: i64, length: usize, line: usize) -> EvalResult<usize> {
    usize::try_from(index).ok()
                          .filter(|&i| i < length)
                          .ok_or(RuntimeError::IndexOutOfBounds { index, length, line })
}
