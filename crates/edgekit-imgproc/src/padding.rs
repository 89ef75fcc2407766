use edgekit_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Symmetric padding that lets a kernel of `kernel_size` be centered on every pixel.
    ///
    /// Each side receives `(dim - 1) / 2` pixels, so odd kernel sizes pad evenly.
    pub fn for_kernel(kernel_size: ImageSize) -> Self {
        let vertical = (kernel_size.height - 1) / 2;
        let horizontal = (kernel_size.width - 1) / 2;
        Padding2D {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }

    /// The size of an image of `size` once this padding is applied.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Creates a new image with a constant border around `src`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `padding` - The amount of padding (in pixels) for all four sides.
/// * `constant_value` - The value written into the border.
///
/// # Example
///
/// ```rust
/// use edgekit_image::Image;
/// use edgekit_imgproc::padding::{spatial_padding, Padding2D};
///
/// let src = Image::from_rows(&[&[1, 2][..], &[3, 4][..]]).unwrap();
/// let padding = Padding2D { top: 1, bottom: 0, left: 0, right: 1 };
///
/// let dst = spatial_padding(&src, padding, 0).unwrap();
///
/// assert_eq!(dst.as_slice(), &[0, 0, 0, 1, 2, 0, 3, 4, 0]);
/// ```
pub fn spatial_padding<T>(
    src: &Image<T>,
    padding: Padding2D,
    constant_value: T,
) -> Result<Image<T>, ImageError>
where
    T: Copy + Send + Sync,
{
    let new_size = padding.padded_size(src.size());
    let mut dst = Image::from_size_val(new_size, constant_value)?;

    let (top, left) = (padding.top, padding.left);
    let src_rows = top..top + src.rows();
    let src_cols = src.cols();

    parallel::par_rows_indexed(&mut dst, |r, dst_row| {
        if src_rows.contains(&r) {
            dst_row[left..left + src_cols].copy_from_slice(src.row(r - top));
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_for_kernel() {
        let padding = Padding2D::for_kernel([5, 3].into());
        assert_eq!(
            padding,
            Padding2D {
                top: 1,
                bottom: 1,
                left: 2,
                right: 2
            }
        );
        assert_eq!(
            padding.padded_size([4, 4].into()),
            ImageSize {
                width: 8,
                height: 6
            }
        );
    }

    #[test]
    fn test_spatial_padding_zero() -> Result<(), ImageError> {
        let src = Image::<i32>::from_size_val([2, 2].into(), 7)?;
        let dst = spatial_padding(&src, Padding2D::for_kernel([3, 3].into()), 0)?;

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 0,
            0, 7, 7, 0,
            0, 7, 7, 0,
            0, 0, 0, 0,
        ];
        assert_eq!(dst.size(), ImageSize { width: 4, height: 4 });
        assert_eq!(dst.as_slice(), &expected);
        Ok(())
    }

    #[test]
    fn test_spatial_padding_none() -> Result<(), ImageError> {
        let src = Image::from_rows(&[&[1, 2, 3][..]])?;
        let dst = spatial_padding(&src, Padding2D::for_kernel([1, 1].into()), 0)?;
        assert_eq!(dst, src);
        Ok(())
    }
}
