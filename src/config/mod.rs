//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`CERBERUS_ISSUER_URL`, `CERBERUS_STORAGE_DIR`)
//!    with the build-time `VITE_API_URL` alias for the issuer.
//! 2. TOML file specified via --config CLI flag
//! 3. ./cerberus.toml in the current directory
//! 4. $XDG_CONFIG_HOME/cerberus/cerberus.toml (or ~/.config/cerberus/cerberus.toml)
//! 5. Built-in defaults
//!
//! ```toml
//! [issuer]
//! base_url = "https://auth.example.com"
//!
//! [storage]
//! dir = "/tmp/cerberus-storage"
//! ```

use std::path::PathBuf;

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use loader::{load_config, load_config_with_diagnostics};
pub use types::{Config, ConfigDiagnostics, IssuerBaseUrl, LoadedConfig, StorageConfig};
use types::FileConfig;

/// Root for per-user config (`$XDG_CONFIG_HOME` or `~/.config`).
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

/// Default directory for the CLI's file-backed storage scopes.
pub fn default_storage_dir() -> Option<PathBuf> {
    config_root_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::STORAGE_DIR_NAME)
    })
}
