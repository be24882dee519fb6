//! Character recognizer
//!
//! The recognizer normalizes a segment, compares it against every template
//! whose label occurs in the candidate string and ranks the single
//! character labels by distance. Results are memoized by the candidate
//! string and the segment's ink layout, hashed through a fingerprint.

use crate::cache::{GlyphKey, MemoryCache, RecognitionCache};
use crate::charset::{self, GRAPHICS};
use crate::normalize::normalize;
use crate::{RecogResult, RecognitionDistance, RecognitionSettings, Segment, TemplateSet};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Anything that can rank a segment against candidate characters
///
/// The label combiner only needs this, which keeps it testable without a
/// template library.
pub trait GlyphRecognizer: Sync {
    /// Distance of `segment` to each character of `candidates`
    fn recognize(&self, segment: &Segment, candidates: &str) -> RecogResult<RecognitionDistance>;
}

/// Outcome of [`CharacterRecognizer::is_possible_character`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterCheck {
    /// The segment looks like text
    pub accepted: bool,
    /// Best candidate over the full alphabet
    pub best: Option<char>,
}

/// 64-bit fingerprint of a candidate string and a segment's ink layout.
///
/// Candidate characters are folded in with a position dependent rotation;
/// ink pixels, in row-major order, advance a running shift weighted by
/// their coordinates.
pub fn fingerprint(segment: &Segment, candidates: &str) -> u64 {
    let mut hash = 0u64;
    for (i, c) in candidates.chars().enumerate() {
        hash ^= (c as u64).rotate_left((i % 56) as u32);
    }

    let mut shift = 0u64;
    for y in 0..segment.height() {
        for x in 0..segment.width() {
            if segment.is_ink(x, y) {
                shift = shift
                    .wrapping_shl(1)
                    .wrapping_add(x as u64 * 3 + y as u64 * 7);
                hash ^= shift;
            }
        }
    }
    hash
}

/// Template matching recognizer
#[derive(Clone)]
pub struct CharacterRecognizer {
    templates: Arc<TemplateSet>,
    cache: Arc<dyn RecognitionCache>,
    settings: RecognitionSettings,
}

impl std::fmt::Debug for CharacterRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterRecognizer")
            .field("templates", &self.templates.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CharacterRecognizer {
    /// Create a recognizer with a private in-memory cache.
    pub fn new(templates: Arc<TemplateSet>, settings: RecognitionSettings) -> RecogResult<Self> {
        settings.validate()?;
        Ok(Self {
            templates,
            cache: Arc::new(MemoryCache::new()),
            settings,
        })
    }

    /// Replace the cache.
    pub fn with_cache(mut self, cache: Arc<dyn RecognitionCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Settings in use
    pub fn settings(&self) -> &RecognitionSettings {
        &self.settings
    }

    /// Template library in use
    pub fn templates(&self) -> &Arc<TemplateSet> {
        &self.templates
    }

    /// Match without consulting the cache.
    fn compute(&self, segment: &Segment, candidates: &str) -> RecogResult<RecognitionDistance> {
        let s = &self.settings;
        let Some(glyph) = normalize(segment.pix(), s)? else {
            return Ok(RecognitionDistance::new());
        };

        let mut ranked: Vec<(f64, char)> = Vec::new();
        for template in self.templates.iter() {
            if !candidates.is_empty() && !candidates.contains(template.label()) {
                continue;
            }
            let Some(c) = template.single_char() else {
                continue;
            };
            let mut distance = match template.compare(&glyph, s) {
                Ok(d) => d,
                Err(e) => {
                    warn!(label = template.label(), error = %e, "skipping template");
                    continue;
                }
            };

            let ratio_diff = (glyph.ratio() - template.ratio()).abs();
            if ratio_diff > s.ratio_threshold_low {
                distance *= s.ratio_penalty_low;
            } else if ratio_diff > s.ratio_threshold_high {
                distance *= s.ratio_penalty_high;
            }

            ranked.push((distance, c));
        }

        // several samples of one character count once, at their best
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut seen = FxHashSet::default();
        Ok(ranked
            .into_iter()
            .filter(|&(_, c)| seen.insert(c))
            .take(s.max_top_variants)
            .map(|(d, c)| (c, d / s.distance_scale_factor))
            .collect())
    }

    /// Rank `segment` against the characters of `candidates`.
    ///
    /// An empty candidate string matches every template. A segment without
    /// ink yields an empty result.
    pub fn recognize(&self, segment: &Segment, candidates: &str) -> RecogResult<RecognitionDistance> {
        let key = GlyphKey::new(segment, candidates);
        if let Some(hit) = self.cache.get(&key) {
            trace!(fingerprint = key.fingerprint(), "recognition cache hit");
            return Ok(hit);
        }
        trace!(fingerprint = key.fingerprint(), "recognition cache miss");

        let result = self.compute(segment, candidates)?;
        if let Some((c, d)) = result.best() {
            debug!(best = %c, distance = d, quality = result.quality(), "recognized segment");
        }
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    /// Recognize many segments in parallel; results keep input order.
    pub fn recognize_batch(
        &self,
        segments: &[Segment],
        candidates: &str,
    ) -> RecogResult<Vec<RecognitionDistance>> {
        segments
            .par_iter()
            .map(|seg| self.recognize(seg, candidates))
            .collect()
    }

    /// Decide whether a segment is text rather than graphics.
    ///
    /// The segment is ranked against the full alphabet. The graphics
    /// sentinel is always rejected, and bond-like characters need at least
    /// `min_endpoints_possible` stroke endpoints. Otherwise the best
    /// distance must be below the strong threshold (or the weak one with
    /// `loose`) and the quality above the minimum.
    pub fn is_possible_character(&self, segment: &Segment, loose: bool) -> RecogResult<CharacterCheck> {
        let rd = self.recognize(segment, charset::ALL)?;
        let Some((best, distance)) = rd.best() else {
            return Ok(CharacterCheck {
                accepted: false,
                best: None,
            });
        };
        let reject = Ok(CharacterCheck {
            accepted: false,
            best: Some(best),
        });

        if best == GRAPHICS {
            return reject;
        }
        if charset::is_like_bond(best)
            && segment.endpoints()?.len() < self.settings.min_endpoints_possible
        {
            return reject;
        }

        let s = &self.settings;
        let quality_ok = rd.quality() > s.possible_minimal_quality;
        let accepted = quality_ok
            && (distance < s.possible_distance_strong
                || (loose && distance < s.possible_distance_weak));
        Ok(CharacterCheck {
            accepted,
            best: Some(best),
        })
    }
}

impl GlyphRecognizer for CharacterRecognizer {
    fn recognize(&self, segment: &Segment, candidates: &str) -> RecogResult<RecognitionDistance> {
        CharacterRecognizer::recognize(self, segment, candidates)
    }
}
