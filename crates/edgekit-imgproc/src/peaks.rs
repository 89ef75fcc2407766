//! Peak extraction on a gradient magnitude map.
//!
//! A pixel is a peak when its magnitude is not exceeded by any of its four axis
//! aligned neighbours. This approximates non-maximum suppression: the comparison does
//! not follow the gradient direction, and flat plateaus keep every pixel.
//!
//! The outermost one pixel frame is never a peak.

use std::time::Instant;

use edgekit_image::{Image, ImageError};

use crate::parallel;

/// Mark the local maxima of a magnitude map.
///
/// # Arguments
///
/// * `src` - The gradient magnitude map.
///
/// # Returns
///
/// A new image of the same size holding `1` at peaks and `0` elsewhere. Images with
/// fewer than three rows or columns have no interior and return all zeros.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_imgproc::peaks::extract_peaks;
///
/// let mag = Image::from_rows(&[
///     &[0, 0, 0][..],
///     &[0, 9, 0][..],
///     &[0, 0, 0][..],
/// ]).unwrap();
///
/// let peaks = extract_peaks(&mag).unwrap();
/// assert_eq!(peaks.as_slice(), &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
/// ```
pub fn extract_peaks(src: &Image<i32>) -> Result<Image<i32>, ImageError> {
    let start = Instant::now();

    let (rows, cols) = (src.rows(), src.cols());
    let mut dst = Image::from_size_val(src.size(), 0i32)?;
    if rows < 3 || cols < 3 {
        return Ok(dst);
    }

    parallel::par_rows_indexed(&mut dst, |r, dst_row| {
        if r == 0 || r == rows - 1 {
            return;
        }
        let prev = src.row(r - 1);
        let row = src.row(r);
        let next = src.row(r + 1);

        for c in 1..cols - 1 {
            let mag = row[c];
            let is_peak =
                mag >= prev[c] && mag >= next[c] && mag >= row[c - 1] && mag >= row[c + 1];
            dst_row[c] = is_peak as i32;
        }
    });

    log::debug!("extracted peaks of {} in {:?}", src.size(), start.elapsed());

    Ok(dst)
}
