#![doc = include_str!("../README.md")]

// NOTE: prefer to leave as much possible as pub,
// so that users can use specific functionality if necessary.

mod private {
    /// Sealed trait to prevent external implementations of traits
    pub trait Sealed {}
}
use private::Sealed;
#[macro_use]
mod macros;
pub mod filter;
#[doc(inline)]
pub use crate::filter::{Filter, FilterType};
mod image;
pub use crate::image::*;
pub mod pixel;
pub use crate::pixel::*;
mod planar;
pub use crate::planar::*;
mod paletted;
pub use crate::paletted::*;
mod source;
pub use crate::source::*;
#[cfg(feature = "image")]
mod compat;

/// The maximum size of an image (in bytes) that can be described by this library. (4GB)
pub const MAX_IMAGE_SIZE: usize = u32::MAX as usize;

/// The type of coefficients (float) used for filter kernels and weights
pub type Weight = f64;
