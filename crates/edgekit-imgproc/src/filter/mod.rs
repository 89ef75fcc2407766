//! Filter operations
//!
//! This module provides the gradient kernels and the dense convolution used by
//! the edge pipelines.

/// Filter kernels
pub mod kernels;

/// Convolution operations
mod convolution;
pub use convolution::*;
