//! Default configuration constants.
//!
//! Keeping defaults in one module lets tests and the loader share the same
//! literals.

/// Production issuer used when nothing else is configured.
pub(super) const DEFAULT_ISSUER_BASE_URL: &str = "https://api.cerberus-iam.com";
/// Directory name under the config root (`~/.config/cerberus`).
pub(super) const CONFIG_DIR_NAME: &str = "cerberus";
/// Config file name looked up locally and under the config root.
pub(super) const CONFIG_FILE_NAME: &str = "cerberus.toml";
/// Subdirectory holding the CLI's file-backed storage scopes.
pub(super) const STORAGE_DIR_NAME: &str = "storage";
pub(super) const SESSION_STORE_FILE: &str = "session.json";
pub(super) const LOCAL_STORE_FILE: &str = "local.json";
