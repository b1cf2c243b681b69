use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts a script index into a position within an array of `length`
/// elements.
///
/// ## Errors
/// `ArrayIndexOutOfRange` if `index` is negative or not below `length`.
///
/// ## Example
/// ```
/// use tommy::{error::RuntimeError, util::num::array_index};
///
/// assert_eq!(array_index(2, 3, 1).unwrap(), 2);
/// assert!(matches!(array_index(3, 3, 1),
///                  Err(RuntimeError::ArrayIndexOutOfRange { index: 3, length: 3, line: 1 })));
/// assert!(array_index(-1, 3, 1).is_err());
/// ```
pub fn array_index(index: i64, length: usize, line: usize) -> EvalResult<usize> {
    usize::try_from(index).ok()
                          .filter(|&position| position < length)
                          .ok_or(RuntimeError::ArrayIndexOutOfRange { index,
                                                                      length,
                                                                      line })
}

/// Converts a host length into a script integer.
///
/// ## Errors
/// `Overflow` if the value does not fit in an `i64`.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}

/// Raises `base` to `exponent` through `f64` and truncates the result.
///
/// The float result is converted back with a saturating cast: values beyond
/// the `i64` range clamp to its bounds, and negative exponents truncate
/// toward zero.
///
/// ## Example
/// ```
/// use tommy::util::num::pow_truncated;
///
/// assert_eq!(pow_truncated(2, 10), 1024);
/// assert_eq!(pow_truncated(2, -1), 0);
/// assert_eq!(pow_truncated(10, 40), i64::MAX);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn pow_truncated(base: i64, exponent: i64) -> i64 {
    (base as f64).powf(exponent as f64) as i64
}
