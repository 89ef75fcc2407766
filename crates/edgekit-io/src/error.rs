/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open, read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error when a header field is missing or cannot be parsed.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// Error when the header declares a non-positive width or height.
    #[error("Invalid image dimensions ({0}x{1}), width and height must be positive")]
    InvalidDimensions(i64, i64),

    /// Error when the file holds fewer pixels than its header declares.
    #[error("Truncated pixel data: expected {0} bytes, found {1}")]
    TruncatedData(usize, usize),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] edgekit_image::ImageError),

    /// Error to move a staged file into its final location.
    #[error("Failed to persist the file. {0}")]
    PersistError(#[from] tempfile::PersistError),
}
