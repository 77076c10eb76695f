//! JSON shapes of the DLP v2 REST API
//!
//! Field names are camelCase, `bytes` fields travel as base64 and `int64`
//! fields may arrive as strings. Zero values are omitted by the service,
//! so most response fields default.

use pii_core::{ByteContentType, InfoType, Likelihood};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_types: Vec<InfoType>,

    #[serde(default, skip_serializing_if = "is_unspecified")]
    pub min_likelihood: Likelihood,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_quote: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByteContentItem {
    #[serde(rename = "type", default, skip_serializing_if = "is_untyped")]
    pub content_type: ByteContentType,

    #[serde(default, with = "base64_bytes")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_item: Option<ByteContentItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ContentItem {
    pub fn bytes(item: &pii_core::ContentItem) -> Self {
        Self {
            byte_item: Some(ByteContentItem::from(item)),
            value: None,
        }
    }

    /// Content carried by the item, whichever form the service chose
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match (self.byte_item, self.value) {
            (Some(byte_item), _) => Some(byte_item.data),
            (None, Some(value)) => Some(value.into_bytes()),
            (None, None) => None,
        }
    }
}

impl From<&pii_core::ContentItem> for ByteContentItem {
    fn from(item: &pii_core::ContentItem) -> Self {
        Self {
            content_type: item.content_type,
            data: item.data.clone(),
        }
    }
}

// ============================================================================
// content:inspect
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectContentRequest {
    pub inspect_config: InspectConfig,
    pub item: ContentItem,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectContentResponse {
    #[serde(default)]
    pub result: InspectResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectResult {
    #[serde(default)]
    pub findings: Vec<Finding>,

    #[serde(default)]
    pub findings_truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(default)]
    pub info_type: Option<InfoType>,

    #[serde(default, deserialize_with = "lenient_likelihood")]
    pub likelihood: Likelihood,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub byte_range: Option<Range>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Range {
    #[serde(default, deserialize_with = "int64")]
    pub start: u64,

    #[serde(default, deserialize_with = "int64")]
    pub end: u64,
}

impl From<Finding> for pii_core::Finding {
    fn from(finding: Finding) -> Self {
        let byte_range = finding
            .location
            .and_then(|l| l.byte_range)
            .map(|r| pii_core::ByteRange {
                start: r.start,
                end: r.end,
            });

        pii_core::Finding {
            info_type: finding.info_type.unwrap_or_else(|| InfoType {
                name: "UNKNOWN".to_string(),
            }),
            likelihood: finding.likelihood,
            location: pii_core::Location { byte_range },
            quote: finding.quote,
        }
    }
}

// ============================================================================
// content:deidentify
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyContentRequest {
    pub deidentify_config: DeidentifyConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,

    pub item: ContentItem,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyConfig {
    pub info_type_transformations: InfoTypeTransformations,
}

impl DeidentifyConfig {
    /// Replace every finding with a fixed string
    pub fn replace_with(placeholder: &str) -> Self {
        Self {
            info_type_transformations: InfoTypeTransformations {
                transformations: vec![InfoTypeTransformation {
                    info_types: Vec::new(),
                    primitive_transformation: PrimitiveTransformation {
                        replace_config: ReplaceValueConfig {
                            new_value: Value {
                                string_value: placeholder.to_string(),
                            },
                        },
                    },
                }],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeTransformations {
    pub transformations: Vec<InfoTypeTransformation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeTransformation {
    /// Empty applies the transformation to every detected info type
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub info_types: Vec<InfoType>,

    pub primitive_transformation: PrimitiveTransformation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveTransformation {
    pub replace_config: ReplaceValueConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceValueConfig {
    pub new_value: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    pub string_value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyContentResponse {
    #[serde(default)]
    pub item: Option<ContentItem>,

    #[serde(default)]
    pub overview: Option<TransformationOverview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationOverview {
    #[serde(default, deserialize_with = "int64")]
    pub transformed_bytes: u64,
}

// ============================================================================
// image:redact
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactImageRequest {
    pub inspect_config: InspectConfig,
    pub image_redaction_configs: Vec<ImageRedactionConfig>,
    pub byte_item: ByteContentItem,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRedactionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_type: Option<InfoType>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub redact_all_text: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactImageResponse {
    #[serde(default, with = "base64_bytes")]
    pub redacted_image: Vec<u8>,

    #[serde(default)]
    pub extracted_text: Option<String>,

    #[serde(default)]
    pub inspect_result: Option<InspectResult>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: u16,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub status: Option<String>,
}

fn is_unspecified(likelihood: &Likelihood) -> bool {
    *likelihood == Likelihood::Unspecified
}

fn is_untyped(content_type: &ByteContentType) -> bool {
    *content_type == ByteContentType::Unspecified
}

/// Decode a likelihood, mapping names this client does not know to `Unspecified`
fn lenient_likelihood<'de, D>(deserializer: D) -> Result<Likelihood, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(name) = Option::<String>::deserialize(deserializer)? else {
        return Ok(Likelihood::Unspecified);
    };
    Ok(Likelihood::ALL
        .into_iter()
        .find(|l| l.as_str() == name)
        .unwrap_or_else(|| {
            tracing::debug!("unknown likelihood {:?}", name);
            Likelihood::Unspecified
        }))
}

/// Decode an `int64` sent either as a JSON string or a number
fn int64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s.parse().map_err(serde::de::Error::custom),
        StringOrNumber::Number(n) => Ok(n),
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(&encoded)
            .or_else(|_| URL_SAFE.decode(&encoded))
            .map_err(serde::de::Error::custom)
    }
}
