//! Error types for chemglyph-recog

use thiserror::Error;

/// Errors that can occur during recognition operations
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] chemglyph_core::Error),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] chemglyph_transform::TransformError),

    /// Morphology library error
    #[error("morph error: {0}")]
    Morph(#[from] chemglyph_morph::MorphError),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An operation that needs at least one input got none
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Building the template library produced no template
    #[error("no usable templates among {attempted} assets")]
    NoTemplates { attempted: usize },

    /// A template asset could not be decoded
    #[error("cannot decode template '{label}': {message}")]
    TemplateDecode { label: String, message: String },

    /// A template's distance maps do not fit the matching geometry
    #[error("malformed template '{label}': {message}")]
    MalformedTemplate { label: String, message: String },

    /// Flat configuration could not be read or written
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
