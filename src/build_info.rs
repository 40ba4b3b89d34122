//! Compile-time build metadata for the CLI.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_COMMIT: &str = env!("CERBERUS_BUILD_GIT_HASH");
pub const BUILD_TIMESTAMP: &str = env!("CERBERUS_BUILD_TIMESTAMP");

/// Text printed by `cerberus-gate --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("CERBERUS_BUILD_GIT_HASH"),
    ", built ",
    env!("CERBERUS_BUILD_TIMESTAMP"),
    ")"
);
