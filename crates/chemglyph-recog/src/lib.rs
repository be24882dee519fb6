//! chemglyph-recog - Glyph recognition and label grouping
//!
//! This crate turns glyph-sized ink segments of a chemical diagram into
//! characters and groups them into text labels:
//!
//! - **Template library**: labeled sample glyphs with precomputed
//!   distance maps ([`TemplateSet`])
//! - **Character recognizer**: shift-tolerant chamfer matching with a
//!   fingerprint-keyed result cache ([`CharacterRecognizer`])
//! - **Label combiner**: proximity graph, edge pruning and line ordering
//!   ([`LabelCombiner`])
//!
//! # Quick Start
//!
//! ```no_run
//! use chemglyph_recog::{
//!     CharacterRecognizer, LabelCombiner, RecognitionSettings, Segment, TemplateAsset,
//!     TemplateSet, charset,
//! };
//! use chemglyph_core::{Pix, PixelDepth};
//! use std::sync::Arc;
//!
//! let settings = RecognitionSettings::default();
//! let mut pm = Pix::new(12, 16, PixelDepth::Bit1).unwrap().to_mut();
//! pm.set_all();
//! let sample: Pix = pm.into();
//! let templates = TemplateSet::build(&[TemplateAsset::raster("N", sample.clone())], &settings).unwrap();
//! let recognizer = CharacterRecognizer::new(Arc::new(templates), settings.clone()).unwrap();
//!
//! let segment = Segment::new(40, 10, sample).unwrap();
//! let rd = recognizer.recognize(&segment, charset::UPPER).unwrap();
//! println!("best: {:?}", rd.best());
//!
//! let combiner = LabelCombiner::new(vec![segment], &recognizer, settings).unwrap();
//! println!("{} labels", combiner.labels().len());
//! ```

pub mod cache;
pub mod charset;
pub mod combiner;
mod distance;
mod error;
pub mod normalize;
pub mod recognizer;
mod segment;
mod settings;
pub mod template;

pub use error::{RecogError, RecogResult};

pub use cache::{GlyphKey, MemoryCache, NoCache, RecognitionCache};
pub use combiner::{CapitalHeight, Label, LabelCombiner, ProximityGraph, estimate_capital_height};
pub use distance::RecognitionDistance;
pub use normalize::NormalizedGlyph;
pub use recognizer::{CharacterCheck, CharacterRecognizer, GlyphRecognizer, fingerprint};
pub use segment::Segment;
pub use settings::RecognitionSettings;
pub use template::{
    DistanceMap, RingOffsets, SharedTemplates, Template, TemplateAsset, TemplateSet, TemplateSource,
};

// Re-export core for convenience
pub use chemglyph_core;
