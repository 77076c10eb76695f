pub mod detect;
pub mod redact;

use anyhow::{Context, Result};
use pii_config::Config;
use pii_dlp::{ClientOptions, CredentialSources, DlpClient, DlpService, Env, ProcessEnv};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::outcome::Outcome;
use detect::DetectOptions;
use redact::{ImageOptions, TextOptions};

/// Overrides the configured service endpoint
pub const ENDPOINT_VAR: &str = "DLP_ENDPOINT";

/// What a binary will ask the service to do, decided before any input is read
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Detect(DetectOptions),
    RedactText(TextOptions),
    RedactImage(ImageOptions),
}

/// Load the config from an explicit path, or the default location
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Client settings from the config, with `DLP_ENDPOINT` taking precedence
pub fn client_options(config: &Config, env: &dyn Env) -> ClientOptions {
    let endpoint = env
        .var(ENDPOINT_VAR)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.dlp.endpoint.clone());

    ClientOptions {
        endpoint,
        timeout: Duration::from_secs(config.dlp.timeout_secs),
        user_agent: config.dlp.user_agent.clone(),
    }
}

/// Resolve credentials and build a client for the configured service
pub fn connect(config: &Config, project_var: &'static str) -> Result<DlpClient> {
    connect_with(config, project_var, &ProcessEnv)
}

pub fn connect_with(
    config: &Config,
    project_var: &'static str,
    env: &dyn Env,
) -> Result<DlpClient> {
    let credentials = CredentialSources::new(project_var)
        .with_project(config.dlp.project.clone())
        .resolve(env)
        .context("issue creating client")?;
    let options = client_options(config, env);

    tracing::debug!(
        "using project {} at {}",
        credentials.project_id,
        options.endpoint
    );
    DlpClient::new(options, credentials).context("issue creating client")
}

/// Run `action` over `content`, writing results to `out` and notices to `err`
pub async fn execute(
    action: &Action,
    service: &dyn DlpService,
    content: Vec<u8>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Outcome> {
    match action {
        Action::Detect(options) => detect::detect(service, &content, options, out, err).await,
        Action::RedactText(options) => redact::redact_text(service, content, options, out).await,
        Action::RedactImage(options) => {
            redact::redact_image(service, content, options, out).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_endpoint_from_config() {
        let mut config = Config::default();
        config.dlp.endpoint = "https://dlp.example.test".to_string();
        config.dlp.timeout_secs = 5;

        let options = client_options(&config, &env(&[]));
        assert_eq!(options.endpoint, "https://dlp.example.test");
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.user_agent, config.dlp.user_agent);
    }

    #[test]
    fn test_endpoint_variable_overrides_config() {
        let mut config = Config::default();
        config.dlp.endpoint = "https://dlp.example.test".to_string();

        let options = client_options(&config, &env(&[(ENDPOINT_VAR, "http://127.0.0.1:9")]));
        assert_eq!(options.endpoint, "http://127.0.0.1:9");

        let options = client_options(&config, &env(&[(ENDPOINT_VAR, "  ")]));
        assert_eq!(options.endpoint, "https://dlp.example.test");
    }
}
