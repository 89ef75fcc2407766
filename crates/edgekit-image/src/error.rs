/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image has a zero width or height.
    #[error("Invalid image dimensions ({0}x{1}), width and height must be positive")]
    InvalidDimensions(usize, usize),

    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must share a size do not.
    #[error("Image size mismatch: ({0}x{1}) vs ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a kernel cannot be centered on a pixel.
    #[error("Kernel dimensions must be odd, got ({0}x{1})")]
    InvalidKernelSize(usize, usize),

    /// Error when an algorithm parameter is outside its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data")]
    CastError,
}
