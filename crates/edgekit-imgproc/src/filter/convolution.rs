use std::time::Instant;

use edgekit_image::{Image, ImageError};

use crate::core::saturate_i32;
use crate::padding::{spatial_padding, Padding2D};
use crate::parallel;

use super::kernels::Kernel;

/// Convolve an image with a dense kernel.
///
/// The image is zero padded by half the kernel size on every side, then each output
/// pixel is the sum of the element-wise products between the kernel and the window of
/// the padded image centered on it. The kernel is not flipped, i.e. this is a
/// cross-correlation. Products are accumulated in `i64` and saturated into `i32`.
///
/// Rows of the output are computed in parallel; the result does not depend on the
/// scheduling.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `kernel` - The kernel with odd width and height.
///
/// # Returns
///
/// A new image with the same size as `src`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernelSize`] if the kernel has an even dimension.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_imgproc::filter::{convolve, kernels::sobel_kernel3};
///
/// let src = Image::from_rows(&[
///     &[0, 0, 10, 10][..],
///     &[0, 0, 10, 10][..],
///     &[0, 0, 10, 10][..],
/// ]).unwrap();
///
/// let dx = convolve(&src, &sobel_kernel3(true).unwrap()).unwrap();
///
/// assert_eq!(dx.row(1), &[0, 40, 40, -40]);
/// ```
pub fn convolve(src: &Image<i32>, kernel: &Kernel) -> Result<Image<i32>, ImageError> {
    if kernel.width() % 2 == 0 || kernel.height() % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel.width(), kernel.height()));
    }

    let start = Instant::now();

    let padded = spatial_padding(src, Padding2D::for_kernel(kernel.size()), 0)?;
    let mut dst = Image::from_size_val(src.size(), 0i32)?;

    parallel::par_rows_indexed(&mut dst, |r, dst_row| {
        dst_row
            .iter_mut()
            .enumerate()
            .for_each(|(c, dst_pixel)| *dst_pixel = weighted_sum(&padded, kernel, r, c));
    });

    log::debug!(
        "convolved {} with {}x{} kernel in {:?}",
        src.size(),
        kernel.width(),
        kernel.height(),
        start.elapsed()
    );

    Ok(dst)
}

/// Sum of products between `kernel` and the window of `padded` whose top-left corner is
/// at `(row, col)`.
fn weighted_sum(padded: &Image<i32>, kernel: &Kernel, row: usize, col: usize) -> i32 {
    let kernel_cols = kernel.cols();
    let mut sum = 0i64;
    for ky in 0..kernel.rows() {
        let window = &padded.row(row + ky)[col..col + kernel_cols];
        sum += window
            .iter()
            .zip(kernel.row(ky))
            .map(|(&p, &k)| p as i64 * k as i64)
            .sum::<i64>();
    }
    saturate_i32(sum)
}
