//! Unified error types for the gate.
//!
//! None of these reach the visitor. Storage and URL failures degrade to a
//! safe navigation target; only config loading and sign-in report errors.

use std::fmt;

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// Errors from a raw key-value store.
#[derive(Debug)]
pub enum StorageError {
    /// Storage is disabled or blocked in this context.
    Unavailable(String),
    Io(std::io::Error),
    /// Persisted contents could not be decoded.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Corrupt(msg) => write!(f, "corrupt storage: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupt(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors reported by the session collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Server rejected the credentials; carries the server's message if any.
    Rejected(Option<String>),
    /// Transport failure talking to the session backend.
    Transport(String),
}

impl SessionError {
    /// Message suitable for showing next to the sign-in form.
    pub fn user_message(&self) -> String {
        let raw = match self {
            Self::Rejected(Some(msg)) | Self::Transport(msg) => msg.trim(),
            Self::Rejected(None) => "",
        };
        if raw.is_empty() {
            "Login failed. Please try again.".to_string()
        } else {
            raw.to_string()
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(Some(msg)) => write!(f, "login rejected: {msg}"),
            Self::Rejected(None) => write!(f, "login rejected"),
            Self::Transport(msg) => write!(f, "session transport: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}
