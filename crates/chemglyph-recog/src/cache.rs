//! Recognition result caches
//!
//! A cache maps a [`GlyphKey`] to a finished [`RecognitionDistance`]. The
//! key hashes by the 64-bit fingerprint of the candidate set and the ink
//! layout, and compares the full layout, so two glyphs whose fingerprints
//! collide get separate entries. Templates and settings are fixed per
//! recognizer, so a cache must not be shared between recognizers that
//! differ in either.

use crate::recognizer::fingerprint;
use crate::{RecognitionDistance, Segment};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};

/// Cache key of one recognition call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphKey {
    fingerprint: u64,
    candidates: String,
    width: i32,
    height: i32,
    ink: Vec<(u32, u32)>,
}

impl GlyphKey {
    /// Key for ranking `segment` against `candidates`
    pub fn new(segment: &Segment, candidates: &str) -> Self {
        Self {
            fingerprint: fingerprint(segment, candidates),
            candidates: candidates.to_owned(),
            width: segment.width(),
            height: segment.height(),
            ink: segment.pix().ink_pixels().collect(),
        }
    }

    /// Fingerprint the key hashes by
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

impl Hash for GlyphKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

/// Storage for memoized recognition results
///
/// Implementations must tolerate concurrent calls. Inserting the same key
/// twice stores the same value, so either insert may win.
pub trait RecognitionCache: Send + Sync {
    /// Look up a cached result
    fn get(&self, key: &GlyphKey) -> Option<RecognitionDistance>;

    /// Store a result
    fn insert(&self, key: GlyphKey, value: RecognitionDistance);
}

/// In-memory cache behind a reader-writer lock
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<FxHashMap<GlyphKey, RecognitionDistance>>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached result
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl RecognitionCache for MemoryCache {
    fn get(&self, key: &GlyphKey) -> Option<RecognitionDistance> {
        self.entries.read().get(key).cloned()
    }

    fn insert(&self, key: GlyphKey, value: RecognitionDistance) {
        self.entries.write().insert(key, value);
    }
}

/// Cache that stores nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl RecognitionCache for NoCache {
    fn get(&self, _key: &GlyphKey) -> Option<RecognitionDistance> {
        None
    }

    fn insert(&self, _key: GlyphKey, _value: RecognitionDistance) {}
}
