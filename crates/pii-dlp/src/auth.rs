//! Project and access token resolution
//!
//! Project id, first non-empty of:
//! 1. the tool's environment variable (`GCP_PROJECT` or `PROJECT_ID`)
//! 2. the configured project
//! 3. `quota_project_id` / `project_id` in the application-default credentials file
//! 4. `gcloud config get-value project`
//!
//! Access token: `GOOGLE_OAUTH_ACCESS_TOKEN`, then
//! `gcloud auth application-default print-access-token`.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use crate::{DlpError, Result};

pub const ACCESS_TOKEN_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
pub const CREDENTIALS_FILE_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Environment lookups, so resolution can be tested without touching the process env
pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Env for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub project_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct CredentialSources {
    /// Environment variable naming the project for this tool
    pub project_var: &'static str,
    pub configured_project: Option<String>,
    /// Fall back to the gcloud CLI when it is on PATH
    pub use_gcloud: bool,
}

impl CredentialSources {
    pub fn new(project_var: &'static str) -> Self {
        Self {
            project_var,
            configured_project: None,
            use_gcloud: true,
        }
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.configured_project = project;
        self
    }

    pub fn resolve(&self, env: &dyn Env) -> Result<Credentials> {
        Ok(Credentials {
            project_id: self.resolve_project(env)?,
            access_token: self.resolve_token(env)?,
        })
    }

    pub fn resolve_project(&self, env: &dyn Env) -> Result<String> {
        if let Some(project) = non_empty(env.var(self.project_var)) {
            tracing::debug!("project from {}", self.project_var);
            return Ok(project);
        }

        if let Some(project) = non_empty(self.configured_project.clone()) {
            tracing::debug!("project from config");
            return Ok(project);
        }

        if let Some(project) = adc_project(env) {
            tracing::debug!("project from application default credentials");
            return Ok(project);
        }

        if self.use_gcloud {
            if let Some(project) = gcloud(&["config", "get-value", "project"])? {
                tracing::debug!("project from gcloud config");
                return Ok(project);
            }
        }

        Err(DlpError::Credentials(format!(
            "no project id: set {} or dlp.project in the config file",
            self.project_var
        )))
    }

    pub fn resolve_token(&self, env: &dyn Env) -> Result<String> {
        if let Some(token) = non_empty(env.var(ACCESS_TOKEN_VAR)) {
            tracing::debug!("access token from {}", ACCESS_TOKEN_VAR);
            return Ok(token);
        }

        if self.use_gcloud {
            if let Some(token) =
                gcloud(&["auth", "application-default", "print-access-token"])?
            {
                tracing::debug!("access token from gcloud");
                return Ok(token);
            }
        }

        Err(DlpError::Credentials(format!(
            "no access token: set {} or log in with `gcloud auth application-default login`",
            ACCESS_TOKEN_VAR
        )))
    }
}

#[derive(Debug, Deserialize)]
struct AdcFile {
    #[serde(default)]
    quota_project_id: Option<String>,
    #[serde(default)]
    project_id: Option<String>,
}

/// Path of the application-default credentials file, if any
fn adc_path(env: &dyn Env) -> Option<PathBuf> {
    if let Some(path) = non_empty(env.var(CREDENTIALS_FILE_VAR)) {
        return Some(PathBuf::from(path));
    }

    let config_dir = if cfg!(windows) {
        PathBuf::from(env.var("APPDATA")?)
    } else {
        PathBuf::from(env.var("HOME")?).join(".config")
    };
    Some(
        config_dir
            .join("gcloud")
            .join("application_default_credentials.json"),
    )
}

/// Project named in the credentials file; an unreadable or malformed file counts as absent
fn adc_project(env: &dyn Env) -> Option<String> {
    let path = adc_path(env)?;
    if !path.exists() {
        return None;
    }

    let adc = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<AdcFile>(&content).map_err(|e| e.to_string())
        });
    match adc {
        Ok(adc) => non_empty(adc.quota_project_id).or_else(|| non_empty(adc.project_id)),
        Err(e) => {
            tracing::debug!("skipping credentials file {}: {}", path.display(), e);
            None
        }
    }
}

/// Run gcloud and return its trimmed stdout, or `None` if gcloud is unavailable or fails
fn gcloud(args: &[&str]) -> Result<Option<String>> {
    let Ok(path) = which::which("gcloud") else {
        return Ok(None);
    };

    let output = Command::new(path).args(args).output()?;
    if !output.status.success() {
        tracing::debug!(
            "gcloud {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(None);
    }

    Ok(non_empty(Some(
        String::from_utf8_lossy(&output.stdout).to_string(),
    )))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn offline(project_var: &'static str) -> CredentialSources {
        CredentialSources {
            use_gcloud: false,
            ..CredentialSources::new(project_var)
        }
    }

    #[test]
    fn test_env_project_wins() {
        let env = env(&[("GCP_PROJECT", "from-env"), (ACCESS_TOKEN_VAR, "tok")]);
        let sources = offline("GCP_PROJECT").with_project(Some("from-config".to_string()));

        let credentials = sources.resolve(&env).unwrap();
        assert_eq!(credentials.project_id, "from-env");
        assert_eq!(credentials.access_token, "tok");
    }

    #[test]
    fn test_blank_env_falls_through_to_config() {
        let env = env(&[("PROJECT_ID", "  ")]);
        let sources = offline("PROJECT_ID").with_project(Some("from-config".to_string()));

        assert_eq!(sources.resolve_project(&env).unwrap(), "from-config");
    }

    #[test]
    fn test_project_from_adc_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adc.json");
        std::fs::write(
            &path,
            r#"{"type": "authorized_user", "quota_project_id": "quota-proj", "client_id": "x"}"#,
        )
        .unwrap();
        let env = env(&[(CREDENTIALS_FILE_VAR, path.to_str().unwrap())]);

        assert_eq!(
            offline("PROJECT_ID").resolve_project(&env).unwrap(),
            "quota-proj"
        );
    }

    #[test]
    fn test_project_from_well_known_file() {
        let home = tempfile::tempdir().unwrap();
        let gcloud_dir = if cfg!(windows) {
            home.path().join("gcloud")
        } else {
            home.path().join(".config").join("gcloud")
        };
        std::fs::create_dir_all(&gcloud_dir).unwrap();
        std::fs::write(
            gcloud_dir.join("application_default_credentials.json"),
            r#"{"type": "service_account", "project_id": "sa-proj"}"#,
        )
        .unwrap();
        let home_var = if cfg!(windows) { "APPDATA" } else { "HOME" };
        let env = env(&[(home_var, home.path().to_str().unwrap())]);

        assert_eq!(
            offline("PROJECT_ID").resolve_project(&env).unwrap(),
            "sa-proj"
        );
    }

    #[test]
    fn test_malformed_adc_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adc.json");
        std::fs::write(&path, "{ not json").unwrap();
        let env = env(&[(CREDENTIALS_FILE_VAR, path.to_str().unwrap())]);

        let err = offline("PROJECT_ID").resolve_project(&env).unwrap_err();
        assert!(matches!(err, DlpError::Credentials(_)));
        assert!(err.to_string().contains("PROJECT_ID"));
    }

    #[test]
    fn test_missing_project_names_variable() {
        let err = offline("GCP_PROJECT")
            .resolve_project(&HashMap::<String, String>::new())
            .unwrap_err();
        assert!(matches!(err, DlpError::Credentials(_)));
        assert!(err.to_string().contains("GCP_PROJECT"));
    }

    #[test]
    fn test_missing_token() {
        let err = offline("PROJECT_ID")
            .resolve_token(&HashMap::<String, String>::new())
            .unwrap_err();
        assert!(err.to_string().contains(ACCESS_TOKEN_VAR));
    }
}
