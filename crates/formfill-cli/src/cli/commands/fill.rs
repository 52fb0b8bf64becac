//! `formfill fill <page.json>` – auto-fill a snapshot the way the keyboard command does.

use anyhow::{bail, Result};
use formfill_core::background::{Dispatch, Router, SessionTab, AUTO_FILL_COMMAND};
use formfill_core::config::FormfillConfig;
use formfill_core::session::Session;
use formfill_core::snapshot::PageSnapshot;
use formfill_core::store::FileStore;
use std::path::Path;
use std::time::Instant;

use super::describe_control;

pub fn run_fill(
    store: FileStore,
    cfg: &FormfillConfig,
    page_path: &Path,
    out: Option<&Path>,
) -> Result<()> {
    let mut page = PageSnapshot::load(page_path)?;
    let before = page.clone();
    let mut session = Session::initialize(store, cfg, &mut page, Instant::now())?;

    let dispatch = Router::new(SessionTab {
        id: 1,
        session: &mut session,
        page: &mut page,
    })
    .on_command(AUTO_FILL_COMMAND);
    if !matches!(dispatch, Dispatch::Delivered(_)) {
        bail!("auto-fill not delivered: {dispatch:?}");
    }

    match page.notices.get(before.notices.len()) {
        Some(notice) => println!("{}", notice.message),
        None => println!("Auto-fill is disabled for this page."),
    }
    for (fi, (new, old)) in page.forms.iter().zip(&before.forms).enumerate() {
        for (ci, (n, o)) in new.controls.iter().zip(&old.controls).enumerate() {
            if n.value != o.value {
                println!("  form {fi} control {ci} {} = {:?}", describe_control(n), n.value);
            }
        }
    }

    if let Some(out) = out {
        page.save(out)?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}
