use async_trait::async_trait;
use pii_core::Finding;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::auth::Credentials;
use crate::service::{
    DeidentifyRequest, DlpService, ImageRedactionTarget, InspectRequest, InspectSettings,
    RedactImageRequest,
};
use crate::wire;
use crate::{DlpError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://dlp.googleapis.com";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("pii-tools/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// DLP v2 REST client
pub struct DlpClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl DlpClient {
    pub fn new(options: ClientOptions, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: options.endpoint.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.credentials.project_id
    }

    /// `{endpoint}/v2/projects/{project}/{method}`
    fn url(&self, method: &str) -> String {
        format!(
            "{}/v2/projects/{}/{}",
            self.endpoint, self.credentials.project_id, method
        )
    }

    async fn call<Req, Resp>(&self, method: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.url(method);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.credentials.access_token)
            .header("x-goog-user-project", &self.credentials.project_id)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<wire::ErrorBody>(&bytes) {
                Ok(body) => match body.error.status {
                    Some(code) => format!("{} ({})", body.error.message, code),
                    None => body.error.message,
                },
                Err(_) => String::from_utf8_lossy(&bytes).trim().to_string(),
            };
            return Err(DlpError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn inspect_config(settings: &InspectSettings) -> wire::InspectConfig {
    wire::InspectConfig {
        info_types: settings.info_types.clone(),
        min_likelihood: settings.min_likelihood,
        include_quote: settings.include_quote,
    }
}

#[async_trait]
impl DlpService for DlpClient {
    async fn inspect(&self, request: &InspectRequest) -> Result<Vec<Finding>> {
        let body = wire::InspectContentRequest {
            inspect_config: inspect_config(&request.settings),
            item: wire::ContentItem::bytes(&request.item),
        };

        let response: wire::InspectContentResponse = self.call("content:inspect", &body).await?;
        if response.result.findings_truncated {
            tracing::warn!("findings were truncated by the service");
        }
        tracing::debug!("{} findings", response.result.findings.len());

        Ok(response
            .result
            .findings
            .into_iter()
            .map(Finding::from)
            .collect())
    }

    async fn deidentify(&self, request: &DeidentifyRequest) -> Result<Vec<u8>> {
        let body = wire::DeidentifyContentRequest {
            deidentify_config: wire::DeidentifyConfig::replace_with(&request.placeholder),
            inspect_config: request.settings.as_ref().map(inspect_config),
            item: wire::ContentItem::bytes(&request.item),
        };

        let response: wire::DeidentifyContentResponse =
            self.call("content:deidentify", &body).await?;
        if let Some(overview) = &response.overview {
            tracing::debug!("{} bytes transformed", overview.transformed_bytes);
        }

        response
            .item
            .and_then(wire::ContentItem::into_bytes)
            .ok_or_else(|| DlpError::InvalidResponse("deidentify returned no item".to_string()))
    }

    async fn redact_image(&self, request: &RedactImageRequest) -> Result<Vec<u8>> {
        let image_redaction_configs = match &request.target {
            ImageRedactionTarget::InfoTypes(info_types) => info_types
                .iter()
                .map(|info_type| wire::ImageRedactionConfig {
                    info_type: Some(info_type.clone()),
                    redact_all_text: false,
                })
                .collect(),
            ImageRedactionTarget::AllText => vec![wire::ImageRedactionConfig {
                info_type: None,
                redact_all_text: true,
            }],
        };

        let body = wire::RedactImageRequest {
            inspect_config: inspect_config(&request.settings),
            image_redaction_configs,
            byte_item: wire::ByteContentItem::from(&request.item),
        };

        let response: wire::RedactImageResponse = self.call("image:redact", &body).await?;
        if let Some(result) = &response.inspect_result {
            tracing::debug!("{} findings in image", result.findings.len());
        }
        tracing::debug!("{} bytes of redacted image", response.redacted_image.len());

        Ok(response.redacted_image)
    }
}
