//! `formfill detect <page.json>` – run one detection pass and print the session state.

use anyhow::Result;
use formfill_core::config::FormfillConfig;
use formfill_core::session::Session;
use formfill_core::snapshot::PageSnapshot;
use formfill_core::store::FileStore;
use std::path::Path;
use std::time::Instant;

pub fn run_detect(store: FileStore, cfg: &FormfillConfig, page_path: &Path) -> Result<()> {
    let mut page = PageSnapshot::load(page_path)?;
    let session = Session::initialize(store, cfg, &mut page, Instant::now())?;
    println!(
        "forms: {}, prompt: {}",
        page.forms.len(),
        if page.prompt_visible { "shown" } else { "hidden" }
    );
    println!("{}", serde_json::to_string_pretty(&session.status())?);
    Ok(())
}
