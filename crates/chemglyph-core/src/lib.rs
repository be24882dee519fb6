//! chemglyph-core - Basic data structures for glyph recognition
//!
//! This crate provides the fundamental data structures used throughout
//! the chemglyph workspace:
//!
//! - [`Pix`] / [`PixMut`] - The raster container (immutable / mutable)
//! - [`Box`] - Rectangle regions
//! - [`GroupHistogram`] - Greedy 1-D grouping of scalar measurements
//!
//! Rasters come in two depths only. 1 bpp rasters are ink masks
//! (1 = ink, 0 = background); 8 bpp rasters are grayscale with 0 = black.

pub mod box_;
pub mod error;
pub mod histogram;
pub mod pix;

pub use box_::Box;
pub use error::{Error, Result};
pub use histogram::GroupHistogram;
pub use pix::{Pix, PixMut, PixelDepth};
