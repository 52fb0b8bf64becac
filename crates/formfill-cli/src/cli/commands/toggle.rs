//! `formfill enable` / `formfill disable` – persist the extension switch.

use anyhow::Result;
use formfill_core::store::{FileStore, ProfileStore, StoredRecord};

pub fn run_toggle(store: &mut FileStore, enabled: bool) -> Result<()> {
    let changed = store.set(StoredRecord {
        extension_enabled: Some(enabled),
        ..StoredRecord::default()
    })?;
    let state = if enabled { "enabled" } else { "disabled" };
    if changed.is_empty() {
        println!("Auto-fill already {state}.");
    } else {
        println!("Auto-fill {state}.");
    }
    Ok(())
}
