//! chemglyph-transform - Raster resizing for glyph normalization
//!
//! This crate provides the scaling operations used to bring glyph rasters
//! of arbitrary size to the canonical matching square:
//!
//! - Sampling (nearest neighbor, any depth)
//! - Linear interpolation (8 bpp)
//! - Area mapping (8 bpp, anti-aliased downscaling)

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale, scale_by_sampling, scale_to_size, scale_to_size_with};
