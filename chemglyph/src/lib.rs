//! chemglyph - Glyph recognition for chemical structure diagrams
//!
//! This crate bundles the chemglyph workspace behind one dependency.
//!
//! # Overview
//!
//! Text in a chemical drawing (atom symbols, charges, subscripts) arrives
//! as small ink segments. chemglyph provides:
//!
//! - A template library of labeled sample glyphs with distance maps
//! - A shift-tolerant character recognizer with a result cache
//! - A label combiner grouping recognized glyphs into ordered labels
//! - Greedy grouping of scalar measurements such as glyph heights
//!
//! # Example
//!
//! ```
//! use chemglyph::{Pix, PixelDepth};
//! use chemglyph::recog::Segment;
//!
//! let pix = Pix::new(12, 16, PixelDepth::Bit1).unwrap();
//! let seg = Segment::new(40, 10, pix).unwrap();
//! assert_eq!(seg.bbox().bottom(), 26);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use chemglyph_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use chemglyph_morph as morph;
pub use chemglyph_recog as recog;
pub use chemglyph_transform as transform;
