#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use edgekit_image as image;

#[doc(inline)]
pub use edgekit_imgproc as imgproc;

#[doc(inline)]
pub use edgekit_io as io;
