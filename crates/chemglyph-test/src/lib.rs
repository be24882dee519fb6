//! chemglyph-test - Regression test harness for chemglyph
//!
//! This crate provides the shared pieces of the workspace's regression
//! suites:
//!
//! - [`RegParams`] - indexed comparisons that collect failures and report
//!   them at [`RegParams::cleanup`]
//! - [`glyphs`] - synthetic glyph rasters drawn from a small bitmap font,
//!   so the suites need no binary fixture files
//!
//! # Usage
//!
//! ```
//! use chemglyph_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to echo every comparison

mod error;
pub mod glyphs;
mod params;

pub use error::{TestError, TestResult};
pub use glyphs::{blob, filled_rect, glyph_rows, render_glyph};
pub use params::{RegParams, RegTestMode};
