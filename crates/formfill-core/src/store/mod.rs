//! Key-value persistence of the profile groups and extension settings.
//!
//! `get` returns only the requested keys; absence means "no data". `set`
//! merges the present fields of a record and reports which keys changed, and
//! every subscribed listener receives the same changed-keys set.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::profile::{Education, Experience, Profile, ProfileData, Skills};

/// Top-level storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreKey {
    Profile,
    Education,
    Experience,
    Skills,
    ExtensionEnabled,
    LastUpdated,
}

impl StoreKey {
    /// The four profile groups.
    pub const GROUPS: [StoreKey; 4] = [
        StoreKey::Profile,
        StoreKey::Education,
        StoreKey::Experience,
        StoreKey::Skills,
    ];

    pub const ALL: [StoreKey; 6] = [
        StoreKey::Profile,
        StoreKey::Education,
        StoreKey::Experience,
        StoreKey::Skills,
        StoreKey::ExtensionEnabled,
        StoreKey::LastUpdated,
    ];

    pub fn is_group(self) -> bool {
        Self::GROUPS.contains(&self)
    }
}

pub type ChangedKeys = BTreeSet<StoreKey>;

/// Callback invoked after a `set` that changed at least one key.
pub type ChangeListener = Box<dyn FnMut(&ChangedKeys) + Send>;

/// Stored record; every key optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<Experience>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_enabled: Option<bool>,
    /// Seconds since the Unix epoch of the last profile save, as written by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl StoredRecord {
    /// Record carrying all four groups of `data`.
    pub fn from_profile(data: ProfileData) -> Self {
        Self {
            profile: data.profile,
            education: Some(data.education),
            experience: Some(data.experience),
            skills: data.skills,
            extension_enabled: None,
            last_updated: Some(now_stamp()),
        }
    }

    /// Set `last_updated` to now.
    pub fn touch(&mut self) {
        self.last_updated = Some(now_stamp());
    }

    pub fn has_any_group(&self) -> bool {
        self.profile.is_some()
            || self.education.is_some()
            || self.experience.is_some()
            || self.skills.is_some()
    }

    /// Profile data, or `None` when no group is stored at all.
    pub fn profile_data(&self) -> Option<ProfileData> {
        if !self.has_any_group() {
            return None;
        }
        Some(ProfileData {
            profile: self.profile.clone(),
            education: self.education.clone().unwrap_or_default(),
            experience: self.experience.clone().unwrap_or_default(),
            skills: self.skills.clone(),
        })
    }

    /// Copy of `self` restricted to `keys`.
    pub fn select(&self, keys: &[StoreKey]) -> StoredRecord {
        let mut out = StoredRecord::default();
        for key in keys {
            match key {
                StoreKey::Profile => out.profile = self.profile.clone(),
                StoreKey::Education => out.education = self.education.clone(),
                StoreKey::Experience => out.experience = self.experience.clone(),
                StoreKey::Skills => out.skills = self.skills.clone(),
                StoreKey::ExtensionEnabled => out.extension_enabled = self.extension_enabled,
                StoreKey::LastUpdated => out.last_updated = self.last_updated.clone(),
            }
        }
        out
    }

    /// Overwrite with the present fields of `update`; returns the keys whose value changed.
    pub fn merge(&mut self, update: StoredRecord) -> ChangedKeys {
        fn apply<T: PartialEq>(
            slot: &mut Option<T>,
            value: Option<T>,
            key: StoreKey,
            changed: &mut ChangedKeys,
        ) {
            if let Some(v) = value {
                if slot.as_ref() != Some(&v) {
                    *slot = Some(v);
                    changed.insert(key);
                }
            }
        }

        let mut changed = ChangedKeys::new();
        apply(&mut self.profile, update.profile, StoreKey::Profile, &mut changed);
        apply(&mut self.education, update.education, StoreKey::Education, &mut changed);
        apply(&mut self.experience, update.experience, StoreKey::Experience, &mut changed);
        apply(&mut self.skills, update.skills, StoreKey::Skills, &mut changed);
        apply(
            &mut self.extension_enabled,
            update.extension_enabled,
            StoreKey::ExtensionEnabled,
            &mut changed,
        );
        apply(&mut self.last_updated, update.last_updated, StoreKey::LastUpdated, &mut changed);
        changed
    }
}

/// Failure of a persistent store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse store {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value persistence of profile data and settings.
pub trait ProfileStore {
    fn get(&self, keys: &[StoreKey]) -> Result<StoredRecord, StoreError>;
    fn set(&mut self, record: StoredRecord) -> Result<ChangedKeys, StoreError>;
    fn subscribe(&mut self, listener: ChangeListener);
}

/// Install hook: if no profile group is stored, write the empty template.
/// Returns true when defaults were written.
pub fn ensure_defaults<S: ProfileStore + ?Sized>(store: &mut S) -> Result<bool, StoreError> {
    let current = store.get(&StoreKey::GROUPS)?;
    if current.has_any_group() {
        return Ok(false);
    }
    store.set(StoredRecord::from_profile(ProfileData::empty_template()))?;
    tracing::info!("default profile structure created");
    Ok(true)
}

fn now_stamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}
