//! Sobel and Canny style edge pipelines.
//!
//! Both pipelines estimate the image gradient with a pair of directional kernels and
//! differ only in the kernels and in the post-processing of the magnitude map:
//!
//! * [`sobel_edges`] convolves with the 3x3 Sobel kernels and thresholds the magnitude
//!   map twice, once with a liberal and once with a restrictive cutoff.
//! * [`canny_peaks`] convolves with first derivative of gaussian kernels and keeps the
//!   local maxima of the magnitude map. Hysteresis and edge linking are not performed.

use std::time::Instant;

use edgekit_image::{Image, ImageError};

use crate::filter::kernels;
use crate::gradient::{spatial_gradient, GradientMaps, GradientOperator};
use crate::{peaks, threshold};

/// One of the rasters produced by an edge pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMap {
    /// Horizontal derivative.
    HorizontalGradient,
    /// Vertical derivative.
    VerticalGradient,
    /// Gradient magnitude.
    Magnitude,
    /// Magnitude thresholded with the low cutoff.
    LiberalEdges,
    /// Magnitude thresholded with the high cutoff.
    RestrictiveEdges,
    /// Local maxima of the magnitude.
    Peaks,
}

impl EdgeMap {
    /// The well-known file stem the map is saved under.
    pub fn file_stem(&self) -> &'static str {
        match self {
            EdgeMap::HorizontalGradient => "horizontalGrad",
            EdgeMap::VerticalGradient => "verticalGrad",
            EdgeMap::Magnitude => "magnitudeMap",
            EdgeMap::LiberalEdges => "liberalEdgeMap",
            EdgeMap::RestrictiveEdges => "restrictiveEdgeMap",
            EdgeMap::Peaks => "peakMap",
        }
    }
}

impl GradientMaps {
    fn into_maps(self) -> Vec<(EdgeMap, Image<i32>)> {
        vec![
            (EdgeMap::HorizontalGradient, self.horizontal),
            (EdgeMap::VerticalGradient, self.vertical),
            (EdgeMap::Magnitude, self.magnitude),
        ]
    }
}

fn check_cutoff(name: &str, cutoff: f64) -> Result<(), ImageError> {
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(ImageError::InvalidParameter(format!(
            "{name} threshold must be within [0, 1], got {cutoff}"
        )));
    }
    Ok(())
}

/// Cutoffs of the Sobel pipeline, relative to the `[0, 255]` intensity range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SobelParams {
    /// Cutoff of the liberal edge map.
    pub low: f64,
    /// Cutoff of the restrictive edge map.
    pub high: f64,
}

impl Default for SobelParams {
    fn default() -> Self {
        Self {
            low: 0.3,
            high: 0.5,
        }
    }
}

impl SobelParams {
    /// Create validated Sobel parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidParameter`] if a cutoff is outside `[0, 1]`.
    pub fn new(low: f64, high: f64) -> Result<Self, ImageError> {
        let params = Self { low, high };
        params.validate()?;
        Ok(params)
    }

    /// Check that both cutoffs are within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ImageError> {
        check_cutoff("low", self.low)?;
        check_cutoff("high", self.high)
    }
}

/// Spread of the derivative of gaussian kernels of the Canny pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyParams {
    /// Spread of the gaussian.
    pub sigma: f64,
}

impl CannyParams {
    /// Create validated Canny parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidParameter`] if sigma is not positive or yields a
    /// degenerate 1x1 kernel.
    pub fn new(sigma: f64) -> Result<Self, ImageError> {
        let params = Self { sigma };
        params.validate()?;
        Ok(params)
    }

    /// Check that sigma produces a kernel with a radius of at least one pixel.
    pub fn validate(&self) -> Result<(), ImageError> {
        kernels::gaussian_derivative_radius(self.sigma).map(|_| ())
    }
}

/// Outputs of the Sobel pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SobelEdges {
    /// Derivatives and magnitude.
    pub gradients: GradientMaps,
    /// Magnitude thresholded with [`SobelParams::low`].
    pub liberal: Image<i32>,
    /// Magnitude thresholded with [`SobelParams::high`].
    pub restrictive: Image<i32>,
}

impl SobelEdges {
    /// Every map of the pipeline, in the order it is reported.
    pub fn into_maps(self) -> Vec<(EdgeMap, Image<i32>)> {
        let mut maps = self.gradients.into_maps();
        maps.push((EdgeMap::LiberalEdges, self.liberal));
        maps.push((EdgeMap::RestrictiveEdges, self.restrictive));
        maps
    }
}

/// Outputs of the Canny pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CannyEdges {
    /// Derivatives and magnitude.
    pub gradients: GradientMaps,
    /// Binary (0/1) peak map of the magnitude.
    pub peaks: Image<i32>,
}

impl CannyEdges {
    /// Every map of the pipeline, in the order it is reported.
    pub fn into_maps(self) -> Vec<(EdgeMap, Image<i32>)> {
        let mut maps = self.gradients.into_maps();
        maps.push((EdgeMap::Peaks, self.peaks));
        maps
    }
}

/// Run the Sobel pipeline.
///
/// # Arguments
///
/// * `src` - The greyscale source image.
/// * `params` - The liberal and restrictive cutoffs.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_imgproc::edges::{sobel_edges, SobelParams};
///
/// let src = Image::from_size_val([5, 5].into(), 100).unwrap();
/// let edges = sobel_edges(&src, &SobelParams::default()).unwrap();
///
/// assert_eq!(*edges.gradients.magnitude.get_unchecked([2, 2]), 0);
/// assert_eq!(*edges.liberal.get_unchecked([2, 2]), 0);
/// ```
pub fn sobel_edges(src: &Image<i32>, params: &SobelParams) -> Result<SobelEdges, ImageError> {
    params.validate()?;
    let start = Instant::now();

    let gradients = spatial_gradient(src, GradientOperator::Sobel)?;
    let liberal = threshold::threshold(&gradients.magnitude, params.low)?;
    let restrictive = threshold::threshold(&gradients.magnitude, params.high)?;

    log::debug!(
        "sobel pipeline on {} finished in {:?}",
        src.size(),
        start.elapsed()
    );

    Ok(SobelEdges {
        gradients,
        liberal,
        restrictive,
    })
}

/// Run the Canny style peak pipeline.
///
/// # Arguments
///
/// * `src` - The greyscale source image.
/// * `params` - The spread of the derivative of gaussian kernels.
pub fn canny_peaks(src: &Image<i32>, params: &CannyParams) -> Result<CannyEdges, ImageError> {
    params.validate()?;
    let start = Instant::now();

    let gradients = spatial_gradient(
        src,
        GradientOperator::GaussianDerivative {
            sigma: params.sigma,
        },
    )?;
    let peaks = peaks::extract_peaks(&gradients.magnitude)?;

    log::debug!(
        "canny pipeline on {} with sigma {} finished in {:?}",
        src.size(),
        params.sigma,
        start.elapsed()
    );

    Ok(CannyEdges { gradients, peaks })
}

/// A configured edge pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeDetector {
    /// Sobel kernels followed by two thresholds.
    Sobel(SobelParams),
    /// Derivative of gaussian kernels followed by peak extraction.
    Canny(CannyParams),
}

impl EdgeDetector {
    /// Run the pipeline and return every map it produces.
    pub fn detect(&self, src: &Image<i32>) -> Result<Vec<(EdgeMap, Image<i32>)>, ImageError> {
        match self {
            EdgeDetector::Sobel(params) => Ok(sobel_edges(src, params)?.into_maps()),
            EdgeDetector::Canny(params) => Ok(canny_peaks(src, params)?.into_maps()),
        }
    }
}
