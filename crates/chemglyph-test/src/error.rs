//! Error types for the test harness

use thiserror::Error;

/// Errors that can occur while building fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// The bitmap font has no glyph for this character
    #[error("no fixture glyph for {0:?}")]
    UnknownGlyph(char),

    /// Invalid fixture size
    #[error("invalid fixture size: {0}")]
    InvalidSize(String),

    /// Raster construction failed
    #[error("core error: {0}")]
    Core(#[from] chemglyph_core::Error),
}

/// Result type for test harness operations
pub type TestResult<T> = Result<T, TestError>;
