use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use edgekit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    ///
    /// PRECONDITION: `width * height` fits in a `usize`, which holds for the size of any
    /// constructed [`Image`].
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Number of pixels covered by this size, or `None` if it overflows a `usize`.
    pub fn checked_area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Pixel count of a size with both dimensions positive and no `usize` overflow.
fn valid_area(size: ImageSize) -> Result<usize, ImageError> {
    match size.checked_area() {
        Some(area) if area > 0 => Ok(area),
        _ => Err(ImageError::InvalidDimensions(size.width, size.height)),
    }
}

/// A single channel raster with row-major pixel storage.
///
/// The buffer owns one contiguous allocation of `width * height` values; pixel
/// `(row, col)` lives at `row * width + col`. Every stage of the edge pipelines
/// produces a fresh `Image` from its inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] if either dimension is zero or the pixel
    /// count overflows a `usize`, and [`ImageError::InvalidChannelShape`] if the length of the pixel data does not
    /// match the image size.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let area = valid_area(size)?;
        if data.len() != area {
            return Err(ImageError::InvalidChannelShape(data.len(), area));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and every pixel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{Image, ImageSize};
    ///
    /// let image = Image::<i32>::from_size_val([3, 2].into(), 0).unwrap();
    ///
    /// assert_eq!(image.width(), 3);
    /// assert_eq!(image.height(), 2);
    /// assert!(image.as_slice().iter().all(|&v| v == 0));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let area = valid_area(size)?;
        Image::new(size, vec![val; area])
    }

    /// Create an image from literal rows.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidChannelShape`] if the rows are ragged.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::Image;
    ///
    /// let image = Image::from_rows(&[&[1, 2, 3][..], &[4, 5, 6][..]]).unwrap();
    ///
    /// assert_eq!(image.width(), 3);
    /// assert_eq!(image.get([1, 2]), Some(&6));
    /// ```
    pub fn from_rows(rows: &[&[T]]) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());

        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(ImageError::InvalidChannelShape(
                    data.len() + row.len(),
                    data.len() + width,
                ));
            }
            data.extend_from_slice(row);
        }

        Image::new(ImageSize { width, height }, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the pixel data as a row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a reference to the pixel at `[row, col]`, or `None` if out of bounds.
    pub fn get(&self, index: [usize; 2]) -> Option<&T> {
        let [row, col] = index;
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.data.get(row * self.width() + col)
    }

    /// Get a reference to the pixel at `[row, col]` without returning an `Option`.
    ///
    /// PRECONDITION: `row < height` and `col < width`.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the pixel storage.
    #[inline]
    pub fn get_unchecked(&self, index: [usize; 2]) -> &T {
        let [row, col] = index;
        &self.data[row * self.size.width + col]
    }

    /// Set the pixel at `[row, col]`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] if the index is outside the image.
    pub fn set(&mut self, index: [usize; 2], val: T) -> Result<(), ImageError> {
        let [row, col] = index;
        if row >= self.height() || col >= self.width() {
            return Err(ImageError::PixelIndexOutOfBounds(
                row,
                col,
                self.width(),
                self.height(),
            ));
        }
        let width = self.width();
        self.data[row * width + col] = val;
        Ok(())
    }

    /// Get one row of pixels.
    ///
    /// PRECONDITION: `row < height`.
    pub fn row(&self, row: usize) -> &[T] {
        let width = self.width();
        &self.data[row * width..(row + 1) * width]
    }

    /// Return a new image with rows and columns swapped.
    pub fn transpose(&self) -> Image<T>
    where
        T: Copy,
    {
        let (width, height) = (self.width(), self.height());
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..width {
            for row in 0..height {
                data.push(self.data[row * width + col]);
            }
        }

        Image {
            size: ImageSize {
                width: height,
                height: width,
            },
            data,
        }
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::CastError`] if a value does not fit in `U`.
    pub fn cast<U>(&self) -> Result<Image<U>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Find the minimum and maximum pixel values.
    pub fn min_max(&self) -> (T, T)
    where
        T: Copy + PartialOrd,
    {
        // a valid image always holds at least one pixel
        let first = self.data[0];
        self.data
            .iter()
            .fold((first, first), |(min, max), &v| {
                (
                    if v < min { v } else { min },
                    if v > max { v } else { max },
                )
            })
    }
}
