use anyhow::{Context, Result};
use pii_config::Config;
use pii_core::{ByteContentType, ContentItem, Finding, LineIndex};
use pii_dlp::{DlpService, ImageRedactionTarget, InspectRequest, InspectSettings};
use std::cell::OnceCell;
use std::io::Write;

use super::Action;
use super::redact::{ImageOptions, TextOptions};
use crate::cli::DetectCli;
use crate::input::read_input;
use crate::outcome::Outcome;

/// Project environment variable for `detect-pii`
pub const PROJECT_VAR: &str = "GCP_PROJECT";

#[derive(Debug, Clone, PartialEq)]
pub struct DetectOptions {
    /// Name used when reporting findings
    pub filename: String,
    pub settings: InspectSettings,
    pub verbosity: u8,
}

/// Pick the action for `detect-pii`. Flags win over the config file, which
/// wins over the built-in defaults.
pub fn plan(cli: &DetectCli, config: &Config) -> Result<Action> {
    let info_types = match &cli.info_types {
        Some(list) => list.0.clone(),
        None => config.detect_info_types()?,
    };
    let likelihood = cli.likelihood.unwrap_or(config.detect.likelihood);
    let mut settings = InspectSettings::new(info_types, likelihood);

    if !cli.redact {
        if cli.image {
            tracing::warn!("--image only applies with --redact; ignoring");
        }
        settings.include_quote = cli.show_quotes;
        return Ok(Action::Detect(DetectOptions {
            filename: cli.file.clone(),
            settings,
            verbosity: cli.verbosity,
        }));
    }

    if cli.image {
        let target = if cli.redact_all_text {
            ImageRedactionTarget::AllText
        } else {
            ImageRedactionTarget::InfoTypes(settings.info_types.clone())
        };
        return Ok(Action::RedactImage(ImageOptions { settings, target }));
    }

    Ok(Action::RedactText(TextOptions {
        placeholder: cli
            .placeholder
            .clone()
            .unwrap_or_else(|| config.redact.placeholder.clone()),
        settings: Some(settings),
        content_type: ByteContentType::TextUtf8,
    }))
}

pub async fn run(cli: DetectCli) -> Result<Outcome> {
    let config = super::load_config(cli.config.as_deref())?;
    let action = plan(&cli, &config)?;
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

/// Inspect `content` and report findings according to the verbosity level.
///
/// Returns `FindingsPresent` when the service found anything.
pub async fn detect(
    service: &dyn DlpService,
    content: &[u8],
    options: &DetectOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Outcome> {
    let request = InspectRequest {
        item: ContentItem::text(content.to_vec()),
        settings: options.settings.clone(),
    };
    let findings = service
        .inspect(&request)
        .await
        .context("issue inspecting")?;

    if options.verbosity == 1 {
        writeln!(out, "{}", findings.len())?;
    }

    if options.verbosity == 2 {
        let index = OnceCell::new();
        for finding in &findings {
            let position = finding
                .location
                .start()
                .and_then(|start| usize::try_from(start).ok())
                .and_then(|start| index.get_or_init(|| LineIndex::new(content)).row_col(start));
            writeln!(out, "{}", describe(&options.filename, position, finding))?;
        }
    }

    if findings.is_empty() {
        return Ok(Outcome::Clean);
    }

    if options.verbosity == 1 {
        writeln!(err, "detect-pii: findings present: {}", options.filename)?;
    }
    Ok(Outcome::FindingsPresent)
}

/// `file:row:col: detect-pii detected LIKELIHOOD INFO_TYPE`, plus the quoted
/// match when the service returned one
fn describe(filename: &str, position: Option<(usize, usize)>, finding: &Finding) -> String {
    let prefix = match position {
        Some((row, col)) => format!("{}:{}:{}", filename, row, col),
        None => filename.to_string(),
    };
    let line = format!(
        "{}: detect-pii detected {} {}",
        prefix, finding.likelihood, finding.info_type
    );
    match &finding.quote {
        Some(quote) => format!("{}: {:?}", line, quote),
        None => line,
    }
}
