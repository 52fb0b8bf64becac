//! JSON file store under the XDG data dir.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{ChangeListener, ChangedKeys, ProfileStore, StoreError, StoreKey, StoredRecord};

/// Whole record kept in one pretty-printed JSON file; re-read on every `get`.
pub struct FileStore {
    path: PathBuf,
    listeners: Vec<ChangeListener>,
}

impl FileStore {
    /// `~/.local/share/formfill/profile.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("formfill")?;
        Ok(xdg_dirs.get_data_home().join("profile.json"))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listeners: Vec::new(),
        }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full record on disk; missing file is an empty record.
    pub fn load(&self) -> Result<StoredRecord, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoredRecord::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, record: &StoredRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("path", &self.path).finish()
    }
}

impl ProfileStore for FileStore {
    fn get(&self, keys: &[StoreKey]) -> Result<StoredRecord, StoreError> {
        Ok(self.load()?.select(keys))
    }

    fn set(&mut self, record: StoredRecord) -> Result<ChangedKeys, StoreError> {
        let mut current = self.load()?;
        let changed = current.merge(record);
        if changed.is_empty() {
            return Ok(changed);
        }
        self.save(&current)?;
        tracing::debug!(path = %self.path.display(), ?changed, "store updated");
        for listener in &mut self.listeners {
            listener(&changed);
        }
        Ok(changed)
    }

    fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}
