#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access, header parsing and staging failures.
pub mod error;

/// Binary greyscale raster (PGM `P5`) encoding and decoding.
///
/// Read and write 8-bit single channel images, see [`pgm::read_image_pgm`].
pub mod pgm;

pub use crate::error::IoError;
