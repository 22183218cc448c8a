//! Settings storage.
//!
//! Settings live in a JSON file whose `env` object carries the provider
//! credentials, mirroring the key-value store the rest of the toolchain
//! writes. Loading is read-only and performs no network calls.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::model::Settings;

/// Sender mailbox used when `OUTLOOK_USER` is unset.
///
/// A placeholder; real deployments are expected to set the key.
pub const DEFAULT_SENDER: &str = "outreach@localhost";

const TENANT_KEY: &str = "MS_TENANT_ID";
const CLIENT_KEY: &str = "MS_CLIENT_ID";
const SECRET_KEY: &str = "MS_CLIENT_SECRET";
const SENDER_KEY: &str = "OUTLOOK_USER";
const CC_KEY: &str = "OUTREACH_CC";
const SUBJECT_KEY: &str = "OUTREACH_SUBJECT";

/// Errors that can occur while resolving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings file does not exist.
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),

    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required key is absent or empty.
    #[error("missing required setting: {0}")]
    MissingField(&'static str),
}

/// On-disk shape of the settings file.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Read-only store resolving [`Settings`] from a JSON file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store for the given settings file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates settings.
    ///
    /// The sender falls back to [`DEFAULT_SENDER`] when unset; all other
    /// required keys must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NotFound`] if the file is missing,
    /// [`SettingsError::Parse`] on malformed JSON, and
    /// [`SettingsError::MissingField`] naming the first absent credential.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            return Err(SettingsError::NotFound(self.path.clone()));
        }

        let raw = fs::read_to_string(&self.path)?;
        let file: SettingsFile = serde_json::from_str(&raw)?;
        let env = &file.env;

        let settings = Settings {
            tenant_id: require(env, TENANT_KEY)?,
            client_id: require(env, CLIENT_KEY)?,
            client_secret: require(env, SECRET_KEY)?,
            sender: optional(env, SENDER_KEY).unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            cc: optional(env, CC_KEY),
            subject: optional(env, SUBJECT_KEY),
        };

        debug!(path = %self.path.display(), sender = %settings.sender, "settings loaded");
        Ok(settings)
    }
}

fn require(env: &HashMap<String, String>, key: &'static str) -> Result<String, SettingsError> {
    optional(env, key).ok_or(SettingsError::MissingField(key))
}

fn optional(env: &HashMap<String, String>, key: &str) -> Option<String> {
    env.get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_complete_settings() {
        let file = write_settings(
            r#"{"env": {
                "MS_TENANT_ID": "tenant",
                "MS_CLIENT_ID": "client",
                "MS_CLIENT_SECRET": "secret",
                "OUTLOOK_USER": "press@example.com",
                "OUTREACH_CC": "team@example.com"
            }}"#,
        );

        let settings = SettingsStore::new(file.path()).load().unwrap();
        assert_eq!(settings.tenant_id, "tenant");
        assert_eq!(settings.client_id, "client");
        assert_eq!(settings.client_secret, "secret");
        assert_eq!(settings.sender, "press@example.com");
        assert_eq!(settings.cc.as_deref(), Some("team@example.com"));
        assert!(settings.subject.is_none());
    }

    #[test]
    fn test_sender_defaults_when_unset() {
        let file = write_settings(
            r#"{"env": {
                "MS_TENANT_ID": "tenant",
                "MS_CLIENT_ID": "client",
                "MS_CLIENT_SECRET": "secret"
            }}"#,
        );

        let settings = SettingsStore::new(file.path()).load().unwrap();
        assert_eq!(settings.sender, DEFAULT_SENDER);
    }

    #[test]
    fn test_missing_credential_named() {
        let file = write_settings(
            r#"{"env": {"MS_TENANT_ID": "tenant", "MS_CLIENT_ID": "client"}}"#,
        );

        let err = SettingsStore::new(file.path()).load().unwrap_err();
        assert!(matches!(err, SettingsError::MissingField("MS_CLIENT_SECRET")));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let file = write_settings(
            r#"{"env": {
                "MS_TENANT_ID": "  ",
                "MS_CLIENT_ID": "client",
                "MS_CLIENT_SECRET": "secret"
            }}"#,
        );

        let err = SettingsStore::new(file.path()).load().unwrap_err();
        assert!(matches!(err, SettingsError::MissingField("MS_TENANT_ID")));
    }

    #[test]
    fn test_missing_file() {
        let err = SettingsStore::new("/nonexistent/settings.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, SettingsError::NotFound(_)));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_settings("not json");
        let err = SettingsStore::new(file.path()).load().unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
