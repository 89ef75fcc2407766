/// Bias subtracted before flooring to absorb floating point representation error.
const ROUNDING_BIAS: f64 = 1e-9;

/// Round a value to the nearest integer by adding one half and flooring.
///
/// A bias of `1e-9` is subtracted before the floor, so a value sitting exactly on
/// a half resolves downwards (`2.5 -> 2`) while anything measurably above it
/// rounds up. Every stage that turns a floating point intermediate into a pixel
/// uses this rule.
///
/// # Examples
///
/// ```
/// use edgekit_imgproc::core::round_biased;
///
/// assert_eq!(round_biased(2.4), 2);
/// assert_eq!(round_biased(2.5), 2);
/// assert_eq!(round_biased(2.51), 3);
/// assert_eq!(round_biased(-2.6), -3);
/// ```
#[inline]
pub fn round_biased(value: f64) -> i64 {
    (value + 0.5 - ROUNDING_BIAS).floor() as i64
}

/// Saturate a wide accumulator into the `i32` pixel range.
#[inline]
pub(crate) fn saturate_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
