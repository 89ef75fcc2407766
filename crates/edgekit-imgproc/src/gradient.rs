use std::time::Instant;

use edgekit_image::{Image, ImageError};

use crate::core::{round_biased, saturate_i32};
use crate::filter::{self, kernels, kernels::Kernel};
use crate::parallel;

/// The directional derivative filters used to estimate the image gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientOperator {
    /// Fixed 3x3 Sobel kernels.
    Sobel,
    /// First derivative of gaussian kernels with the given spread.
    GaussianDerivative {
        /// Spread of the gaussian, must be positive.
        sigma: f64,
    },
}

impl GradientOperator {
    /// Build the (horizontal, vertical) kernel pair of the operator.
    pub fn kernels(&self) -> Result<(Kernel, Kernel), ImageError> {
        match *self {
            GradientOperator::Sobel => Ok((
                kernels::sobel_kernel3(true)?,
                kernels::sobel_kernel3(false)?,
            )),
            GradientOperator::GaussianDerivative { sigma } => Ok((
                kernels::gaussian_derivative_kernel(true, sigma)?,
                kernels::gaussian_derivative_kernel(false, sigma)?,
            )),
        }
    }
}

/// The horizontal and vertical derivatives of an image and their magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientMaps {
    /// Response to intensity changes along the columns.
    pub horizontal: Image<i32>,
    /// Response to intensity changes along the rows.
    pub vertical: Image<i32>,
    /// Per-pixel Euclidean norm of the two responses.
    pub magnitude: Image<i32>,
}

/// Combine two derivative images into a gradient magnitude map.
///
/// Each output pixel is `round(sqrt(h² + v²))`, evaluated in `f64`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `h` and `v` differ in size.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_imgproc::gradient::magnitude;
///
/// let h = Image::from_rows(&[&[3, 0, -6][..]]).unwrap();
/// let v = Image::from_rows(&[&[4, 0, 8][..]]).unwrap();
///
/// assert_eq!(magnitude(&h, &v).unwrap().as_slice(), &[5, 0, 10]);
/// ```
pub fn magnitude(h: &Image<i32>, v: &Image<i32>) -> Result<Image<i32>, ImageError> {
    if h.size() != v.size() {
        return Err(ImageError::InvalidImageSize(
            h.cols(),
            h.rows(),
            v.cols(),
            v.rows(),
        ));
    }

    let mut dst = Image::from_size_val(h.size(), 0i32)?;
    parallel::par_iter_rows_val_two(h, v, &mut dst, |&h, &v, dst_pixel| {
        let (h, v) = (h as f64, v as f64);
        *dst_pixel = saturate_i32(round_biased((h * h + v * v).sqrt()));
    });

    Ok(dst)
}

/// Compute the horizontal and vertical derivatives of an image and their magnitude.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `operator` - The derivative filters to convolve with.
pub fn spatial_gradient(
    src: &Image<i32>,
    operator: GradientOperator,
) -> Result<GradientMaps, ImageError> {
    let (kernel_x, kernel_y) = operator.kernels()?;

    let horizontal = filter::convolve(src, &kernel_x)?;
    let vertical = filter::convolve(src, &kernel_y)?;

    let start = Instant::now();
    let magnitude = magnitude(&horizontal, &vertical)?;
    log::debug!("built magnitude map in {:?}", start.elapsed());

    Ok(GradientMaps {
        horizontal,
        vertical,
        magnitude,
    })
}
