use serde::{Deserialize, Serialize};

use crate::{InfoType, Likelihood};

/// Half-open byte range `[start, end)` into the inspected content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_range: Option<ByteRange>,
}

impl Location {
    pub fn bytes(start: u64, end: u64) -> Self {
        Self {
            byte_range: Some(ByteRange { start, end }),
        }
    }

    /// Offset of the first byte, if the service reported one
    pub fn start(&self) -> Option<u64> {
        self.byte_range.map(|r| r.start)
    }
}

/// A detected PII instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub info_type: InfoType,
    pub likelihood: Likelihood,
    #[serde(default)]
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}
