#![doc = include_str!("../README.md")]
use ::anyhow::{anyhow, Context, Result};
use ::tracing::{debug, instrument, trace};

#[doc(no_inline)]
pub use ::rescale_image::*;

pub mod config;
pub use config::Config;
pub mod parallel;
pub use parallel::{parallel, Disjoint, Indices};
pub mod scan;
pub use scan::{clone_image, scanner, to_nrgba, PixelSource};
pub mod weights;
pub use weights::{WeightEntry, WeightTable};
mod resize;
pub use crate::resize::*;
mod resizer;
pub use resizer::Resizer;
