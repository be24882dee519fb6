//! Error types for chemglyph-transform

use thiserror::Error;

/// Errors that can occur while resizing rasters
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] chemglyph_core::Error),

    /// Invalid scale factor
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: {0}")]
    UnsupportedDepth(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
