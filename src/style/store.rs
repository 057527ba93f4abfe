use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::foundation::error::{FractreeError, FractreeResult};

/// Key-value persistence for style bounds.
///
/// Absence (`None`) is a valid state and distinct from any stored string, including `"0"`.
pub trait BoundsStore: Send {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> FractreeResult<()>;
    /// Forget `key`.
    fn remove(&mut self, key: &str) -> FractreeResult<()>;
}

/// In-memory store for tests and sessions that should not persist.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BoundsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> FractreeResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> FractreeResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a flat JSON object of strings, rewritten on every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`. A missing file is an empty store; an unreadable or malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> FractreeResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                FractreeError::resource(format!(
                    "bounds store '{}' is not a JSON string map: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(FractreeError::resource(format!(
                    "failed to read bounds store '{}': {e}",
                    path.display()
                )));
            }
        };
        Ok(Self { path, entries })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> FractreeResult<()> {
        let text = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| FractreeError::serde(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                FractreeError::resource(format!(
                    "failed to create store dir '{}': {e}",
                    parent.display()
                ))
            })?;
        }
        std::fs::write(&self.path, text).map_err(|e| {
            FractreeError::resource(format!(
                "failed to write bounds store '{}': {e}",
                self.path.display()
            ))
        })
    }
}

impl BoundsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> FractreeResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> FractreeResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/store.rs"]
mod tests;
