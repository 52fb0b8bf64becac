//! `formfill profile init|show|set|export|import`.

use anyhow::{bail, Context, Result};
use formfill_core::catalog::SemanticField;
use formfill_core::profile::ProfileData;
use formfill_core::store::{ensure_defaults, FileStore, ProfileStore, StoreKey, StoredRecord};
use std::fs;
use std::path::Path;

use crate::cli::ProfileAction;

/// Keys written by export: the four groups plus the save stamp.
const EXPORT_KEYS: [StoreKey; 5] = [
    StoreKey::Profile,
    StoreKey::Education,
    StoreKey::Experience,
    StoreKey::Skills,
    StoreKey::LastUpdated,
];

pub fn run_profile(store: &mut FileStore, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Init => {
            if ensure_defaults(store)? {
                println!("Created empty profile at {}", store.path().display());
            } else {
                println!("Profile already exists at {}", store.path().display());
            }
        }
        ProfileAction::Show => {
            let record = store.get(&StoreKey::ALL)?;
            if record == StoredRecord::default() {
                println!("No saved profile. Run `formfill profile init` or `formfill profile import`.");
            } else {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
        }
        ProfileAction::Set { field, value } => set_field(store, field, value)?,
        ProfileAction::Export { path } => export(store, &path)?,
        ProfileAction::Import { path } => import(store, &path)?,
    }
    Ok(())
}

fn set_field(store: &mut FileStore, field: SemanticField, value: String) -> Result<()> {
    let record = store.get(&StoreKey::GROUPS)?;
    let mut data = record
        .profile_data()
        .unwrap_or_else(ProfileData::empty_template);
    data.set_value(field, value.as_str());
    let changed = store.set(StoredRecord::from_profile(data))?;
    if changed.iter().any(|k| k.is_group()) {
        println!("Set {field} = {value:?}");
    } else {
        println!("{field} unchanged.");
    }
    Ok(())
}

fn export(store: &FileStore, path: &Path) -> Result<()> {
    let record = store.get(&EXPORT_KEYS)?;
    let Some(data) = record.profile_data() else {
        bail!("no saved profile to export");
    };
    let json = serde_json::to_string_pretty(&record)?;
    fs::write(path, json).with_context(|| format!("write export: {}", path.display()))?;
    println!(
        "Exported {} filled fields to {}",
        data.filled_field_count(),
        path.display()
    );
    Ok(())
}

fn import(store: &mut FileStore, path: &Path) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read import: {}", path.display()))?;
    let mut record: StoredRecord = serde_json::from_str(&text)
        .with_context(|| format!("parse import: {}", path.display()))?;
    if !record.has_any_group() {
        bail!("{} contains no profile data", path.display());
    }
    // The switch is a local setting, never part of a profile file.
    record.extension_enabled = None;
    record.touch();
    let changed = store.set(record)?;
    let keys: Vec<String> = changed
        .iter()
        .filter(|k| k.is_group())
        .map(|k| format!("{k:?}").to_lowercase())
        .collect();
    if keys.is_empty() {
        println!("Profile unchanged.");
    } else {
        println!("Imported {}", keys.join(", "));
    }
    Ok(())
}
