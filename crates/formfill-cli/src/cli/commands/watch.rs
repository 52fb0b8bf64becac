//! `formfill watch <page.json>` – rescan a snapshot file on the rescan schedule.
//!
//! A background task polls the file for URL changes (fed to the scheduler as
//! navigation) and the store for the enabled switch, so `formfill disable` in
//! another shell pauses a running watch.

use anyhow::Result;
use formfill_core::config::FormfillConfig;
use formfill_core::scheduler::driver::{self, ScanTarget};
use formfill_core::scheduler::{RescanScheduler, ScanTrigger};
use formfill_core::session::Session;
use formfill_core::snapshot::PageSnapshot;
use formfill_core::store::{FileStore, ProfileStore, StoreKey};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time;

const FOLLOW_INTERVAL: Duration = Duration::from_millis(250);

struct WatchedPage {
    session: Session<FileStore>,
    path: PathBuf,
    page: PageSnapshot,
    scans: usize,
    max_scans: Option<usize>,
}

impl ScanTarget for WatchedPage {
    fn scheduler(&mut self) -> &mut RescanScheduler {
        self.session.scheduler_mut()
    }

    fn on_scan(&mut self, trigger: ScanTrigger) -> ControlFlow<()> {
        let now = time::Instant::now().into_std();
        match PageSnapshot::load(&self.path) {
            Ok(mut fresh) => {
                fresh.prompt_visible = self.page.prompt_visible;
                self.page = fresh;
            }
            Err(e) => tracing::warn!("reload {}: {e:#}", self.path.display()),
        }
        self.session.expire_prompt(&mut self.page, now);
        let detection = self.session.scan(trigger, &mut self.page, now);
        self.scans += 1;
        println!(
            "{:<10} forms={} detection={} prompt={}",
            format!("{trigger:?}").to_lowercase(),
            self.page.forms.len(),
            detection,
            if self.page.prompt_visible { "shown" } else { "hidden" }
        );
        match self.max_scans {
            Some(max) if self.scans >= max => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }

    fn on_enabled(&mut self, on: bool) {
        if self.session.status().enabled == on {
            return;
        }
        let now = time::Instant::now().into_std();
        self.session.set_enabled(on, &mut self.page, now);
        println!(
            "{:<10} detection={} prompt={}",
            if on { "enabled" } else { "disabled" },
            self.session.detection(),
            if self.page.prompt_visible { "shown" } else { "hidden" }
        );
    }
}

/// Poll the snapshot URL and the enabled switch until the scan loop goes away.
async fn follow(
    path: PathBuf,
    mut last_url: String,
    urls: mpsc::Sender<String>,
    flags: FileStore,
    enabled: watch::Sender<bool>,
) {
    let mut tick = time::interval(FOLLOW_INTERVAL);
    loop {
        tick.tick().await;
        match flags.get(&[StoreKey::ExtensionEnabled]) {
            Ok(record) => {
                let on = record.extension_enabled.unwrap_or(true);
                enabled.send_if_modified(|current| std::mem::replace(current, on) != on);
            }
            Err(e) => tracing::debug!("read enabled flag: {e}"),
        }
        let Ok(page) = PageSnapshot::load(&path) else {
            continue;
        };
        if page.url != last_url {
            last_url = page.url.clone();
            if urls.send(page.url).await.is_err() {
                break;
            }
        }
    }
}

pub async fn run_watch(
    store: FileStore,
    cfg: &FormfillConfig,
    path: PathBuf,
    max_scans: Option<usize>,
) -> Result<()> {
    let mut page = PageSnapshot::load(&path)?;
    let flags = FileStore::open(store.path());
    let session = Session::initialize(store, cfg, &mut page, time::Instant::now().into_std())?;
    let status = session.status();
    if status.inert {
        println!("{} is an internal page; nothing to watch.", page.url);
        return Ok(());
    }
    if !status.enabled {
        println!("Auto-fill is disabled; run `formfill enable` first.");
        return Ok(());
    }
    println!(
        "watching {} every {} ms (detection={})",
        path.display(),
        cfg.scan_interval_ms,
        status.detection
    );

    let (url_tx, url_rx) = mpsc::channel(8);
    let (enabled_tx, enabled_rx) = watch::channel(true);
    let follower = tokio::spawn(follow(path.clone(), page.url.clone(), url_tx, flags, enabled_tx));

    let mut target = WatchedPage {
        session,
        path,
        page,
        scans: 0,
        max_scans,
    };
    let scans = driver::run(&mut target, url_rx, enabled_rx).await;
    follower.abort();
    tracing::info!(scans, "watch finished");
    Ok(())
}
