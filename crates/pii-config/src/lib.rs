use anyhow::Context;
use pii_core::{DEFAULT_DETECT_INFO_TYPES, DEFAULT_IMAGE_INFO_TYPES, InfoType, Likelihood};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration shared by the PII tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dlp: DlpConfig,

    #[serde(default)]
    pub detect: DetectConfig,

    #[serde(default)]
    pub redact: RedactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlpConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Used when the tool's project environment variable is unset
    #[serde(default)]
    pub project: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectConfig {
    #[serde(default = "default_likelihood")]
    pub likelihood: Likelihood,

    #[serde(default = "default_detect_info_types")]
    pub info_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactConfig {
    /// Replacement for redacted spans when the tool has no fixed placeholder
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default = "default_image_info_types")]
    pub image_info_types: Vec<String>,
}

impl Default for DlpConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            project: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            likelihood: default_likelihood(),
            info_types: default_detect_info_types(),
        }
    }
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            image_info_types: default_image_info_types(),
        }
    }
}

fn default_endpoint() -> String {
    "https://dlp.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pii-tools/{}", env!("CARGO_PKG_VERSION"))
}

fn default_likelihood() -> Likelihood {
    Likelihood::Likely
}

fn default_placeholder() -> String {
    "[redacted]".to_string()
}

fn default_detect_info_types() -> Vec<String> {
    DEFAULT_DETECT_INFO_TYPES.iter().map(|s| s.to_string()).collect()
}

fn default_image_info_types() -> Vec<String> {
    DEFAULT_IMAGE_INFO_TYPES.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Load config from an explicit path, which must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("issue reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("issue parsing config {}", path.display()))?;
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "pii-tools", "pii-tools") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.pii-tools/config.toml")
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.detect_info_types()?;
        self.image_info_types()?;
        if self.dlp.timeout_secs == 0 {
            anyhow::bail!("dlp.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn detect_info_types(&self) -> anyhow::Result<Vec<InfoType>> {
        to_info_types(&self.detect.info_types).context("invalid detect.info_types")
    }

    pub fn image_info_types(&self) -> anyhow::Result<Vec<InfoType>> {
        to_info_types(&self.redact.image_info_types).context("invalid redact.image_info_types")
    }
}

fn to_info_types(names: &[String]) -> pii_core::Result<Vec<InfoType>> {
    names.iter().map(|name| InfoType::new(name.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dlp.endpoint, "https://dlp.googleapis.com");
        assert_eq!(config.dlp.timeout_secs, 30);
        assert_eq!(config.detect.likelihood, Likelihood::Likely);
        assert_eq!(config.redact.placeholder, "[redacted]");
        assert_eq!(config.detect_info_types().unwrap().len(), 15);
        assert_eq!(config.image_info_types().unwrap().len(), 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.detect.info_types, config.detect.info_types);
        assert_eq!(parsed.dlp.endpoint, config.dlp.endpoint);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[dlp]
project = "acme-prod"
timeout_secs = 5

[detect]
likelihood = "POSSIBLE"
info_types = ["EMAIL_ADDRESS", "PHONE_NUMBER"]
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dlp.project.as_deref(), Some("acme-prod"));
        assert_eq!(config.dlp.timeout_secs, 5);
        assert_eq!(config.dlp.endpoint, "https://dlp.googleapis.com");
        assert_eq!(config.detect.likelihood, Likelihood::Possible);
        assert_eq!(config.detect_info_types().unwrap().len(), 2);
        assert_eq!(config.redact.placeholder, "[redacted]");
    }

    #[test]
    fn test_invalid_info_type_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[detect]\ninfo_types = [\"not valid\"]\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.toml")).is_err());
    }
}
