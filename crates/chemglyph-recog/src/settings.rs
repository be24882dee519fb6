//! Recognition settings
//!
//! Every tunable of glyph normalization, template matching, character
//! acceptance and label combining lives in one flat [`RecognitionSettings`]
//! struct. It round-trips through a flat `key = value` document so a run
//! can be reproduced from its configuration.

use crate::{RecogError, RecogResult};
use serde::{Deserialize, Serialize};

/// Options for glyph recognition and label combining
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecognitionSettings {
    /// Side of the square every glyph is resized to (default: 30)
    pub canonical_size: u32,

    /// Positional slack of the matcher in pixels, on every side (default: 2)
    pub penalty_shift: u32,

    /// Step between tried offsets (default: 1)
    pub penalty_step: u32,

    /// Gray values at or below this are ink (default: 190)
    pub binarization_threshold: u8,

    /// Aspect ratio difference above which `ratio_penalty_low` applies
    /// (default: 0.3)
    pub ratio_threshold_low: f64,

    /// Multiplier for a moderate aspect ratio mismatch (default: 1.1)
    pub ratio_penalty_low: f64,

    /// Aspect ratio difference above which `ratio_penalty_high` would apply
    /// (default: 0.5)
    ///
    /// The low threshold is checked first, so with the defaults this
    /// multiplier is never reached.
    pub ratio_threshold_high: f64,

    /// Multiplier for a large aspect ratio mismatch (default: 1.3)
    pub ratio_penalty_high: f64,

    /// Number of best candidates kept in a recognition result (default: 5)
    pub max_top_variants: usize,

    /// Raw match sums are divided by this (default: 20.0)
    pub distance_scale_factor: f64,

    /// Distance under which a glyph is accepted as a character
    /// (default: 3.0)
    pub possible_distance_strong: f64,

    /// Distance under which a glyph is accepted in loose mode
    /// (default: 4.5)
    pub possible_distance_weak: f64,

    /// Minimal gap between best and runner-up candidate (default: 0.1)
    pub possible_minimal_quality: f64,

    /// Stroke endpoints required for bond-like characters (default: 1)
    pub min_endpoints_possible: usize,

    /// Distance under which a short glyph may still set the capital
    /// height (default: 3.0)
    pub capital_fallback_distance: f64,

    /// Capital height error margin (default: 0.5)
    pub cap_height_error: f64,

    /// Line spacing as a fraction of the capital height (default: 0.5)
    pub line_spacing_ratio: f64,

    /// Stray glyphs taller than capital height plus this are ignored
    /// (default: 3)
    pub sym_height_error: i32,

    /// Largest width/height ratio of a stray line glyph (default: 1.4)
    pub max_sym_ratio: f64,

    /// Smallest width/height ratio of a stray line glyph (default: 0.2)
    pub min_sym_ratio: f64,

    /// Pull stray glyphs from the other layer before combining
    /// (default: false)
    pub fetch_stray_symbols: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            canonical_size: 30,
            penalty_shift: 2,
            penalty_step: 1,
            binarization_threshold: 190,
            ratio_threshold_low: 0.3,
            ratio_penalty_low: 1.1,
            ratio_threshold_high: 0.5,
            ratio_penalty_high: 1.3,
            max_top_variants: 5,
            distance_scale_factor: 20.0,
            possible_distance_strong: 3.0,
            possible_distance_weak: 4.5,
            possible_minimal_quality: 0.1,
            min_endpoints_possible: 1,
            capital_fallback_distance: 3.0,
            cap_height_error: 0.5,
            line_spacing_ratio: 0.5,
            sym_height_error: 3,
            max_sym_ratio: 1.4,
            min_sym_ratio: 0.2,
            fetch_stray_symbols: false,
        }
    }
}

impl RecognitionSettings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canonical glyph size
    pub fn with_canonical_size(mut self, size: u32) -> Self {
        self.canonical_size = size;
        self
    }

    /// Set the matcher's shift margin
    pub fn with_penalty_shift(mut self, shift: u32) -> Self {
        self.penalty_shift = shift;
        self
    }

    /// Set the matcher's shift step
    pub fn with_penalty_step(mut self, step: u32) -> Self {
        self.penalty_step = step;
        self
    }

    /// Set the binarization threshold
    pub fn with_binarization_threshold(mut self, threshold: u8) -> Self {
        self.binarization_threshold = threshold;
        self
    }

    /// Set the number of retained candidates
    pub fn with_max_top_variants(mut self, count: usize) -> Self {
        self.max_top_variants = count;
        self
    }

    /// Set the distance scale factor
    pub fn with_distance_scale_factor(mut self, factor: f64) -> Self {
        self.distance_scale_factor = factor;
        self
    }

    /// Set the strict and loose acceptance distances
    pub fn with_possible_distances(mut self, strong: f64, weak: f64) -> Self {
        self.possible_distance_strong = strong;
        self.possible_distance_weak = weak;
        self
    }

    /// Set the minimal acceptance quality
    pub fn with_possible_minimal_quality(mut self, quality: f64) -> Self {
        self.possible_minimal_quality = quality;
        self
    }

    /// Set the endpoints required for bond-like characters
    pub fn with_min_endpoints_possible(mut self, count: usize) -> Self {
        self.min_endpoints_possible = count;
        self
    }

    /// Set the capital height error margin
    pub fn with_cap_height_error(mut self, error: f64) -> Self {
        self.cap_height_error = error;
        self
    }

    /// Set the line spacing ratio
    pub fn with_line_spacing_ratio(mut self, ratio: f64) -> Self {
        self.line_spacing_ratio = ratio;
        self
    }

    /// Enable or disable the stray glyph pass
    pub fn with_fetch_stray_symbols(mut self, enabled: bool) -> Self {
        self.fetch_stray_symbols = enabled;
        self
    }

    /// Side of the padded distance maps.
    pub fn map_side(&self) -> usize {
        (self.canonical_size + 2 * self.penalty_shift) as usize
    }

    /// Validate settings
    pub fn validate(&self) -> RecogResult<()> {
        let invalid = |msg: &str| Err(RecogError::InvalidParameter(msg.to_string()));

        if self.canonical_size == 0 {
            return invalid("canonical_size must be positive");
        }
        if self.penalty_step == 0 {
            return invalid("penalty_step must be positive");
        }
        if self.max_top_variants == 0 {
            return invalid("max_top_variants must be positive");
        }
        if !(self.distance_scale_factor > 0.0) {
            return invalid("distance_scale_factor must be positive");
        }
        if self.ratio_threshold_low < 0.0 || self.ratio_threshold_high < 0.0 {
            return invalid("ratio thresholds must be non-negative");
        }
        if self.possible_distance_weak < self.possible_distance_strong {
            return invalid("possible_distance_weak must not be below possible_distance_strong");
        }
        if !(self.cap_height_error > 0.0) {
            return invalid("cap_height_error must be positive");
        }
        if !(self.line_spacing_ratio > 0.0) {
            return invalid("line_spacing_ratio must be positive");
        }
        if self.min_sym_ratio > self.max_sym_ratio {
            return invalid("min_sym_ratio must not exceed max_sym_ratio");
        }
        Ok(())
    }

    /// Serialize as a flat `key = value` document.
    pub fn to_key_values(&self) -> RecogResult<String> {
        toml::to_string(self).map_err(|e| RecogError::Config(e.to_string()))
    }

    /// Parse a flat `key = value` document.
    ///
    /// Missing keys take their default value, unknown keys are rejected and
    /// the result is validated.
    pub fn from_key_values(text: &str) -> RecogResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| RecogError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}
