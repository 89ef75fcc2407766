use edgekit_image::{Image, ImageError};

use crate::core::round_biased;
use crate::parallel;

/// The intensity that marks a pixel as an edge in a binary edge map.
pub const EDGE_VALUE: i32 = 255;

/// Scale a relative cutoff into the `[0, 255]` intensity range.
///
/// The cutoff is clamped into `[0, 1]` before scaling.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] if the cutoff is NaN.
///
/// # Examples
///
/// ```
/// use edgekit_imgproc::threshold::threshold_level;
///
/// assert_eq!(threshold_level(0.3).unwrap(), 76);
/// assert_eq!(threshold_level(1.5).unwrap(), 255);
/// ```
pub fn threshold_level(cutoff: f64) -> Result<i32, ImageError> {
    if cutoff.is_nan() {
        return Err(ImageError::InvalidParameter(
            "threshold cutoff must be a number".to_string(),
        ));
    }
    Ok(round_biased(EDGE_VALUE as f64 * cutoff.clamp(0.0, 1.0)) as i32)
}

/// Binarize a magnitude map against a relative cutoff.
///
/// Every pixel greater than or equal to [`threshold_level`] of the cutoff becomes
/// [`EDGE_VALUE`], the rest become zero. Several cutoffs can be applied to the same map
/// independently.
///
/// # Arguments
///
/// * `src` - The gradient magnitude map.
/// * `cutoff` - The relative cutoff in `[0, 1]`.
///
/// # Returns
///
/// A new binary image with the same size as `src`.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_imgproc::threshold::threshold;
///
/// let mag = Image::from_rows(&[&[0, 127, 128, 400][..]]).unwrap();
///
/// let edges = threshold(&mag, 0.5).unwrap();
/// assert_eq!(edges.as_slice(), &[0, 255, 255, 255]);
/// ```
pub fn threshold(src: &Image<i32>, cutoff: f64) -> Result<Image<i32>, ImageError> {
    let level = threshold_level(cutoff)?;

    let mut dst = Image::from_size_val(src.size(), 0i32)?;
    parallel::par_iter_rows_val(src, &mut dst, |&src_pixel, dst_pixel| {
        *dst_pixel = if src_pixel >= level { EDGE_VALUE } else { 0 };
    });

    Ok(dst)
}
