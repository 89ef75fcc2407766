use edgekit_image::{Image, ImageError, ImageSize};

use crate::core::round_biased;

/// A convolution kernel: an odd sized integer raster centered at `(height / 2, width / 2)`.
pub type Kernel = Image<i32>;

/// Horizontal 3x3 Sobel coefficients, row-major.
const SOBEL_HORIZONTAL_3X3: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];

/// Create a 3x3 sobel kernel.
///
/// # Arguments
///
/// * `horizontal` - Whether to return the kernel responding to horizontal intensity
///   changes. The vertical kernel is its transpose.
///
/// # Examples
///
/// ```
/// use edgekit_imgproc::filter::kernels::sobel_kernel3;
///
/// let kernel = sobel_kernel3(false).unwrap();
/// assert_eq!(kernel.row(0), &[-1, -2, -1]);
/// assert_eq!(kernel.row(2), &[1, 2, 1]);
/// ```
pub fn sobel_kernel3(horizontal: bool) -> Result<Kernel, ImageError> {
    let size = ImageSize {
        width: 3,
        height: 3,
    };
    let mut data = SOBEL_HORIZONTAL_3X3.to_vec();
    if !horizontal {
        for i in 0..3 {
            for j in 0..3 {
                data[j * 3 + i] = SOBEL_HORIZONTAL_3X3[i * 3 + j];
            }
        }
    }

    Image::new(size, data)
}

/// Radius of the derivative of gaussian kernel for a given sigma.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] if sigma is not a positive finite number
/// or is so small that the radius rounds to zero.
pub fn gaussian_derivative_radius(sigma: f64) -> Result<usize, ImageError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ImageError::InvalidParameter(format!(
            "sigma must be a positive number, got {sigma}"
        )));
    }

    let radius = round_biased(3.0 * sigma);
    if radius < 1 {
        return Err(ImageError::InvalidParameter(format!(
            "sigma {sigma} is too small, the kernel would be 1x1"
        )));
    }

    Ok(radius as usize)
}

/// Create a first derivative of gaussian kernel.
///
/// The kernel has radius `c = round(3 * sigma)` and size `2c + 1`. For an offset
/// `(x, y)` from the center the coefficient is
/// `round(factor * axis * exp(-(x² + y²) / (2σ²)))`, where `axis` is `x` for the
/// horizontal kernel and `y` for the vertical one and
/// `factor = 1 / (c * exp(-c² / σ²))` scales the outermost coefficients to about one.
///
/// # Arguments
///
/// * `horizontal` - Whether to differentiate along columns (`x`) or rows (`y`).
/// * `sigma` - The spread of the gaussian.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] if sigma is invalid, see
/// [`gaussian_derivative_radius`], or if a coefficient does not fit an `i32`.
///
/// # Examples
///
/// ```
/// use edgekit_imgproc::filter::kernels::gaussian_derivative_kernel;
///
/// let kernel = gaussian_derivative_kernel(true, 0.5).unwrap();
/// assert_eq!(kernel.as_slice(), &[-1, 0, 1, -7, 0, 7, -1, 0, 1]);
/// ```
pub fn gaussian_derivative_kernel(horizontal: bool, sigma: f64) -> Result<Kernel, ImageError> {
    let radius = gaussian_derivative_radius(sigma)?;
    let dim = 2 * radius + 1;

    let c = radius as f64;
    let sigma_sq = sigma * sigma;
    let factor = 1.0 / (c * (-(c * c) / sigma_sq).exp());

    let mut data = Vec::with_capacity(dim * dim);
    for i in 0..dim {
        let y = i as f64 - c;
        for j in 0..dim {
            let x = j as f64 - c;
            let gauss = (-(x * x + y * y) / (2.0 * sigma_sq)).exp();
            let axis = if horizontal { x } else { y };
            let value = round_biased(factor * axis * gauss);
            let value = i32::try_from(value).map_err(|_| {
                ImageError::InvalidParameter(format!(
                    "sigma {sigma} produces kernel coefficients beyond the i32 range"
                ))
            })?;
            data.push(value);
        }
    }

    Image::new(
        ImageSize {
            width: dim,
            height: dim,
        },
        data,
    )
}
