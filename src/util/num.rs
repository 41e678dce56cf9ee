use crate::error::ExpressionError;

/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_I64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use formulary::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!"), Ok(42.0));
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an integral `f64` to `i64` if it lies in the exactly representable
/// range.
///
/// ## Returns
/// - `Some(i64)` for finite values without a fractional part.
/// - `None` for fractional, non-finite or out-of-range values.
///
/// ## Example
/// ```
/// use formulary::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(-12.0), Some(-12));
/// assert_eq!(f64_to_i64_exact(1.5), None);
/// assert_eq!(f64_to_i64_exact(f64::NAN), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_I64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Joins the decimal digits of two integral numbers into one integer.
///
/// The left operand keeps its sign, so `-1 ~ 2` is `-12`. The right operand
/// must not be negative, and the joined number must stay within the exactly
/// representable range.
///
/// ## Errors
/// - [`ExpressionError::NonIntegralConcatenation`] if either operand has a
///   fractional part.
/// - [`ExpressionError::NegativeConcatenation`] if the right operand is
///   negative.
/// - [`ExpressionError::ConcatenationOverflow`] if the result is too large.
///
/// ## Example
/// ```
/// use formulary::util::num::join_integers;
///
/// assert_eq!(join_integers(12.0, 34.0, 0), Ok(1234.0));
/// assert!(join_integers(1.5, 2.0, 0).is_err());
/// ```
pub fn join_integers(left: f64, right: f64, position: usize) -> Result<f64, ExpressionError> {
    let (Some(l), Some(r)) = (f64_to_i64_exact(left), f64_to_i64_exact(right)) else {
        return Err(ExpressionError::NonIntegralConcatenation { left,
                                                               right,
                                                               position });
    };
    if r < 0 {
        return Err(ExpressionError::NegativeConcatenation { right, position });
    }

    let joined = format!("{l}{r}").parse::<i64>()
                                  .map_err(|_| ExpressionError::ConcatenationOverflow { position })?;
    i64_to_f64_checked(joined, ExpressionError::ConcatenationOverflow { position })
}
