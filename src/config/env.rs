//! Environment override and legacy env-alias handling.
//!
//! Canonical `CERBERUS_*` variables take precedence. The build-time
//! `VITE_API_URL` name is accepted as an alias for the issuer and surfaced via
//! diagnostics.

use std::path::PathBuf;

use crate::error::ConfigError;

use super::{Config, ConfigDiagnostics, IssuerBaseUrl};

pub(super) const ISSUER_ENV: &str = "CERBERUS_ISSUER_URL";
pub(super) const LEGACY_ISSUER_ENV: &str = "VITE_API_URL";
pub(super) const STORAGE_DIR_ENV: &str = "CERBERUS_STORAGE_DIR";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = env_with_legacy(env_lookup, ISSUER_ENV, LEGACY_ISSUER_ENV) {
        config.issuer = IssuerBaseUrl::new(&url)
            .map_err(|err| ConfigError::Invalid(format!("{ISSUER_ENV}: {err}")))?;
    }
    if let Some(dir) = non_blank(env_lookup(STORAGE_DIR_ENV)) {
        config.storage.dir = Some(PathBuf::from(dir));
    }
    Ok(())
}

/// Resolve a value from canonical env var or, if absent, its legacy alias.
///
/// Blank values count as unset, matching `VITE_API_URL || default`.
pub(super) fn env_with_legacy<FEnv>(
    env_lookup: &FEnv,
    canonical: &str,
    legacy: &str,
) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    non_blank(env_lookup(canonical)).or_else(|| non_blank(env_lookup(legacy)))
}

/// Record diagnostics for legacy env alias usage when canonical vars are absent.
pub(super) fn collect_legacy_env_warnings<FEnv>(
    diagnostics: &mut ConfigDiagnostics,
    env_lookup: &FEnv,
) where
    FEnv: Fn(&str) -> Option<String>,
{
    if non_blank(env_lookup(ISSUER_ENV)).is_none() && non_blank(env_lookup(LEGACY_ISSUER_ENV)).is_some() {
        diagnostics.deprecations.push(format!(
            "Detected build-time env var `{LEGACY_ISSUER_ENV}`. Use {ISSUER_ENV} instead."
        ));
    }
}

/// Sort and deduplicate diagnostic strings for stable output.
pub(super) fn dedupe_diagnostics(diagnostics: &mut ConfigDiagnostics) {
    diagnostics.deprecations.sort();
    diagnostics.deprecations.dedup();
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
