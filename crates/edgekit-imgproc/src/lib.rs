#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// scalar helpers shared by every stage.
pub mod core;

/// edge pipelines composed from the stages below.
pub mod edges;

/// image filtering module.
pub mod filter;

/// gradient estimation module.
pub mod gradient;

/// operations to normalize images.
pub mod normalize;

/// border padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// local maxima extraction module.
pub mod peaks;

/// operations to threshold images.
pub mod threshold;
