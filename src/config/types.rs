//! Configuration data model.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::error::ConfigError;

use super::defaults::{DEFAULT_ISSUER_BASE_URL, LOCAL_STORE_FILE, SESSION_STORE_FILE};

/// Root address of the authorization server.
///
/// Trimmed of surrounding whitespace and trailing slashes on construction, so
/// it never ends with `/` and paths can be appended with a single `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerBaseUrl(String);

impl IssuerBaseUrl {
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("issuer base url is empty".to_string()));
        }
        let parsed = Url::parse(trimmed).map_err(|err| {
            ConfigError::Invalid(format!("issuer base url `{trimmed}` is not absolute: {err}"))
        })?;
        if !parsed.origin().is_tuple() {
            return Err(ConfigError::Invalid(format!(
                "issuer base url `{trimmed}` has no host"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IssuerBaseUrl {
    fn default() -> Self {
        Self(DEFAULT_ISSUER_BASE_URL.to_string())
    }
}

impl fmt::Display for IssuerBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub issuer: IssuerBaseUrl,
    pub storage: StorageConfig,
}

/// Where the CLI keeps its file-backed storage scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Explicit directory; `None` means `<config root>/cerberus/storage`.
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn session_file(&self, fallback_dir: &std::path::Path) -> PathBuf {
        self.dir_or(fallback_dir).join(SESSION_STORE_FILE)
    }

    pub fn local_file(&self, fallback_dir: &std::path::Path) -> PathBuf {
        self.dir_or(fallback_dir).join(LOCAL_STORE_FILE)
    }

    fn dir_or(&self, fallback_dir: &std::path::Path) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| fallback_dir.to_path_buf())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub(super) issuer: FileIssuerConfig,
    pub(super) storage: FileStorageConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileIssuerConfig {
    #[serde(alias = "url")]
    pub(super) base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileStorageConfig {
    pub(super) dir: Option<String>,
}

/// Diagnostics captured while resolving runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigDiagnostics {
    /// Legacy compatibility paths currently in use.
    pub deprecations: Vec<String>,
}

/// Configuration payload plus load-time diagnostics.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub diagnostics: ConfigDiagnostics,
}
