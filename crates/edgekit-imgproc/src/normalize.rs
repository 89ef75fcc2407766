//! Contrast stretching of integer rasters into the displayable range.
//!
//! Intermediate maps such as signed derivatives, magnitudes or binary peak maps hold
//! values far outside `[0, 255]`. Before they are written to disk they are linearly
//! rescaled so the smallest value maps to `0` and the largest to `255`:
//!
//! ```text
//! out = min(round((value - min) * 255 / (max - min)), 255)
//! ```
//!
//! A flat image (`max == min`) has no range to stretch and maps to all zeros.

use edgekit_image::{Image, ImageError};

use crate::core::round_biased;
use crate::parallel;

/// Largest intensity of the output range.
pub const MAX_INTENSITY: u8 = 255;

/// Find the minimum and maximum values in an image.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_imgproc::normalize::find_min_max;
///
/// let image = Image::from_rows(&[&[3, -2][..], &[8, 0][..]]).unwrap();
///
/// let (min, max) = find_min_max(&image);
/// assert_eq!(min, -2);
/// assert_eq!(max, 8);
/// ```
pub fn find_min_max<T>(image: &Image<T>) -> (T, T)
where
    T: Copy + PartialOrd,
{
    image.min_max()
}

/// Linearly rescale an integer image into `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The input image with arbitrary integer values.
///
/// # Returns
///
/// A new 8-bit image where the minimum of `src` maps to `0` and the maximum to `255`.
/// If every pixel holds the same value the result is all zeros.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_imgproc::normalize::normalize_min_max;
///
/// let image = Image::from_rows(&[&[-10, 0, 10][..]]).unwrap();
///
/// let normalized = normalize_min_max(&image).unwrap();
/// assert_eq!(normalized.as_slice(), &[0, 127, 255]);
/// ```
pub fn normalize_min_max(src: &Image<i32>) -> Result<Image<u8>, ImageError> {
    let (min, max) = find_min_max(src);
    let mut dst = Image::from_size_val(src.size(), 0u8)?;

    let range = max as i64 - min as i64;
    if range == 0 {
        return Ok(dst);
    }

    let factor = MAX_INTENSITY as f64 / range as f64;
    parallel::par_iter_rows_val(src, &mut dst, |&src_pixel, dst_pixel| {
        let scaled = round_biased(factor * (src_pixel as i64 - min as i64) as f64);
        *dst_pixel = scaled.clamp(0, MAX_INTENSITY as i64) as u8;
    });

    Ok(dst)
}
