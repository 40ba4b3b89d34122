//! JSON-file store used by the CLI to keep values between invocations.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::StorageError;

/// Key-value store persisted as a flat JSON object on disk.
///
/// Every write replaces the whole file through a synced temporary sibling and
/// a rename, so a value written before a navigation is visible to the next
/// process and an interrupted write never leaves a half-written file behind.
/// A file that is already corrupt is overwritten by the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the backing file. Missing files are not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn modify<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _held = self
            .guard
            .lock()
            .map_err(|_| StorageError::Unavailable("file store lock poisoned".to_string()))?;
        let mut entries = match load_entries(&self.path) {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(reason)) => {
                tracing::debug!(%reason, "discarding corrupt storage file");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        apply(&mut entries);
        write_entries(&self.path, &entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(load_entries(&self.path)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    match std::fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(text) => serde_json::from_str(&text).map_err(|err| {
            StorageError::Corrupt(format!("failed to parse `{}`: {err}", path.display()))
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(StorageError::Io(err)),
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            // Only tighten directories this store created.
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
    }

    let text = serde_json::to_string_pretty(entries)?;
    let staging = staging_path(path);
    let mut options = std::fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let written = options.open(&staging).and_then(|mut file| {
        file.write_all(text.as_bytes())?;
        file.flush()?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| std::fs::rename(&staging, path)) {
        let _ = std::fs::remove_file(&staging);
        return Err(StorageError::Io(err));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
