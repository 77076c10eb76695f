use anyhow::{Context, Result};
use pii_config::Config;
use pii_core::{ByteContentType, ContentItem, Likelihood};
use pii_dlp::{
    DeidentifyRequest, DlpService, ImageRedactionTarget, InspectSettings, RedactImageRequest,
};
use std::io::Write;

use super::Action;
use crate::cli::{RedactCli, RedactPiiCli};
use crate::input::read_input;
use crate::outcome::Outcome;

/// Project environment variable for `redact-pii` and `redact`
pub const PROJECT_VAR: &str = "PROJECT_ID";

pub const REDACT_PII_PLACEHOLDER: &str = "[redacted]";
pub const REDACT_PLACEHOLDER: &str = "xxx";

#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub placeholder: String,
    /// `None` lets the service pick what to detect
    pub settings: Option<InspectSettings>,
    pub content_type: ByteContentType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOptions {
    pub settings: InspectSettings,
    pub target: ImageRedactionTarget,
}

impl TextOptions {
    /// Service-default detection, replacing findings with `placeholder`
    pub fn service_defaults(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            settings: None,
            content_type: ByteContentType::Unspecified,
        }
    }
}

/// `redact-pii`: service-default text redaction, or the configured image info types
pub fn plan_redact_pii(cli: &RedactPiiCli, config: &Config) -> Result<Action> {
    if !cli.image {
        return Ok(Action::RedactText(TextOptions::service_defaults(
            REDACT_PII_PLACEHOLDER,
        )));
    }

    let info_types = config.image_info_types()?;
    Ok(Action::RedactImage(ImageOptions {
        settings: InspectSettings::new(info_types.clone(), Likelihood::Unspecified),
        target: ImageRedactionTarget::InfoTypes(info_types),
    }))
}

/// `redact`: text redaction with a fixed placeholder
pub fn plan_redact(_cli: &RedactCli) -> Action {
    Action::RedactText(TextOptions::service_defaults(REDACT_PLACEHOLDER))
}

pub async fn run_redact_pii(cli: RedactPiiCli) -> Result<Outcome> {
    let config = super::load_config(cli.config.as_deref())?;
    let action = plan_redact_pii(&cli, &config)?;
    let content = read_input(&cli.file)?;
    let client = super::connect(&config, PROJECT_VAR)?;

    super::execute(
        &action,
        &client,
        content,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
    .await
}

pub async fn run_redact(cli: RedactCli) -> Result<Outcome> {
    let config = super::load_config(cli.config.as_deref())?;
    let action = plan_redact(&cli);
    let content = read_input(&cli.file)?;
    let client = super::connect(&config, PROJECT_VAR)?;

    super::execute(
        &action,
        &client,
        content,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
    .await
}

/// Replace findings in text and print the result followed by a newline
pub async fn redact_text(
    service: &dyn DlpService,
    content: Vec<u8>,
    options: &TextOptions,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let request = DeidentifyRequest {
        item: ContentItem::untyped(content).with_type(options.content_type),
        placeholder: options.placeholder.clone(),
        settings: options.settings.clone(),
    };
    let redacted = service
        .deidentify(&request)
        .await
        .context("issue redacting")?;

    out.write_all(&redacted)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(Outcome::Clean)
}

/// Mask findings in an image and write the raw image bytes
pub async fn redact_image(
    service: &dyn DlpService,
    content: Vec<u8>,
    options: &ImageOptions,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let request = RedactImageRequest {
        item: ContentItem::image(content),
        settings: options.settings.clone(),
        target: options.target.clone(),
    };
    tracing::debug!("redacting {:?} image", request.item.content_type);

    let image = service
        .redact_image(&request)
        .await
        .context("issue redacting")?;

    out.write_all(&image)?;
    out.flush()?;
    Ok(Outcome::Clean)
}
