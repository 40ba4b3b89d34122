//! Config-file source discovery.
//!
//! Source order: explicit path > local file > global file > built-in defaults.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConfigSource {
    /// Config loaded from explicit `--config` path.
    Explicit(PathBuf),
    /// Config loaded from local `./cerberus.toml`.
    Local,
    /// Config loaded from `<config root>/cerberus/cerberus.toml`.
    Global(PathBuf),
    /// No file found; runtime defaults were used.
    BuiltInDefaults,
}

/// Read config text from the highest-precedence available source.
pub(super) fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit path must exist; silently falling back would hide typos.
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}
