//! DLP service trait

use async_trait::async_trait;
use pii_core::{ContentItem, Finding, InfoType, Likelihood};

use crate::Result;

/// Which categories to look for and how sure the service must be
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectSettings {
    pub info_types: Vec<InfoType>,
    pub min_likelihood: Likelihood,
    pub include_quote: bool,
}

impl InspectSettings {
    pub fn new(info_types: Vec<InfoType>, min_likelihood: Likelihood) -> Self {
        Self {
            info_types,
            min_likelihood,
            include_quote: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub item: ContentItem,
    pub settings: InspectSettings,
}

#[derive(Debug, Clone)]
pub struct DeidentifyRequest {
    pub item: ContentItem,
    /// Replacement for every matched span
    pub placeholder: String,
    /// `None` leaves detection settings to the service defaults
    pub settings: Option<InspectSettings>,
}

/// What to mask in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRedactionTarget {
    InfoTypes(Vec<InfoType>),
    AllText,
}

#[derive(Debug, Clone)]
pub struct RedactImageRequest {
    pub item: ContentItem,
    pub settings: InspectSettings,
    pub target: ImageRedactionTarget,
}

/// The remote operations the tools rely on
#[async_trait]
pub trait DlpService: Send + Sync {
    /// Report findings in the content
    async fn inspect(&self, request: &InspectRequest) -> Result<Vec<Finding>>;

    /// Return the content with every finding replaced by the placeholder
    async fn deidentify(&self, request: &DeidentifyRequest) -> Result<Vec<u8>>;

    /// Return the image with the targeted regions masked
    async fn redact_image(&self, request: &RedactImageRequest) -> Result<Vec<u8>>;
}
