//! Core domain models for the PII tools
//!
//! This crate contains:
//! - Info types and likelihood thresholds understood by the DLP service
//! - Findings and their byte locations
//! - Content items read from input
//! - The line index used to report findings as `file:row:col`

pub mod content;
pub mod error;
pub mod finding;
pub mod info_type;
pub mod likelihood;
pub mod line_index;

pub use content::{ByteContentType, ContentItem};
pub use error::{Error, Result};
pub use finding::{ByteRange, Finding, Location};
pub use info_type::{
    DEFAULT_DETECT_INFO_TYPES, DEFAULT_IMAGE_INFO_TYPES, InfoType, parse_info_types,
};
pub use likelihood::Likelihood;
pub use line_index::LineIndex;
