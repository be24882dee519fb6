//! chemglyph-morph - Skeleton analysis of glyph masks
//!
//! This crate provides:
//!
//! - Connectivity-preserving thinning of 1 bpp masks to 1-pixel wide
//!   skeletons
//! - Endpoint extraction on skeletons, used to count stroke ends of a
//!   glyph segment

pub mod endpoints;
mod error;
pub mod thin;

pub use endpoints::{count_endpoints, find_endpoints};
pub use error::{MorphError, MorphResult};
pub use thin::{thin, thin_connected};
