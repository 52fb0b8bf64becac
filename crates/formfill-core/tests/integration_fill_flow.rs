//! Integration test: install defaults, save a profile to the file store, then
//! detect and fill a snapshot page through the router, the session and the
//! rescan driver.

mod common;

use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use formfill_core::background::{Dispatch, Router, SessionTab, AUTO_FILL_COMMAND};
use formfill_core::config::FormfillConfig;
use formfill_core::message::Response;
use formfill_core::page::Notice;
use formfill_core::scheduler::driver::{self, ScanTarget};
use formfill_core::scheduler::{RescanScheduler, ScanTrigger};
use formfill_core::session::{Detection, Session};
use formfill_core::snapshot::{FormSnapshot, PageSnapshot};
use formfill_core::store::{ensure_defaults, FileStore, MemoryStore, ProfileStore, StoredRecord};
use tempfile::tempdir;
use tokio::sync::{mpsc, watch};

#[test]
fn saved_profile_fills_application_page() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("profile.json"));
    assert!(ensure_defaults(&mut store).unwrap());
    store
        .set(StoredRecord::from_profile(common::pages::profile()))
        .unwrap();

    let page_path = dir.path().join("page.json");
    std::fs::write(&page_path, common::pages::APPLICATION_PAGE).unwrap();
    let mut page = PageSnapshot::load(&page_path).unwrap();

    let cfg = FormfillConfig::default();
    let mut session = Session::initialize(store, &cfg, &mut page, Instant::now()).unwrap();
    assert_eq!(session.detection(), Detection::PromptShown);
    assert!(page.prompt_visible);

    let mut router = Router::new(SessionTab {
        id: 7,
        session: &mut session,
        page: &mut page,
    });
    assert_eq!(
        router.on_command(AUTO_FILL_COMMAND),
        Dispatch::Delivered(Response::Processed)
    );
    drop(router);

    assert_eq!(session.detection(), Detection::Filled);
    assert_eq!(page.last_notice(), Some(&Notice::filled(5)));
    assert!(!page.prompt_visible);

    page.save(&page_path).unwrap();
    let reloaded = PageSnapshot::load(&page_path).unwrap();
    let values: Vec<&str> = reloaded.forms[0]
        .controls
        .iter()
        .map(|c| c.value.as_str())
        .collect();
    assert_eq!(
        values,
        vec![
            "abc123",
            "Ada",
            "Lovelace",
            "ada@example.com",
            "+44 20 7946 0000",
            "Already typed",
            "University of London",
            "",
            "",
        ]
    );
}

#[test]
fn store_change_reaches_session_through_router() {
    let mut page = PageSnapshot::from_json(common::pages::APPLICATION_PAGE).unwrap();
    let cfg = FormfillConfig::default();
    let mut session =
        Session::initialize(MemoryStore::new(), &cfg, &mut page, Instant::now()).unwrap();
    assert!(!session.status().data_loaded);
    assert!(!page.prompt_visible);

    let changed = session
        .store_mut()
        .set(StoredRecord::from_profile(common::pages::profile()))
        .unwrap();
    let mut router = Router::new(SessionTab {
        id: 1,
        session: &mut session,
        page: &mut page,
    });
    assert_eq!(router.on_store_changed(&changed), 1);
    drop(router);

    assert!(session.status().data_loaded);
    // Next scan picks up the form now that data is present.
    assert_eq!(
        session.scan(ScanTrigger::Interval, &mut page, Instant::now()),
        Detection::PromptShown
    );
}

/// Session over a page that re-renders between scans.
struct RenderingTab {
    session: Session<MemoryStore>,
    renders: VecDeque<PageSnapshot>,
    page: PageSnapshot,
}

impl ScanTarget for RenderingTab {
    fn scheduler(&mut self) -> &mut RescanScheduler {
        self.session.scheduler_mut()
    }

    fn on_scan(&mut self, trigger: ScanTrigger) -> ControlFlow<()> {
        if let Some(next) = self.renders.pop_front() {
            self.page = next;
        }
        let now = tokio::time::Instant::now().into_std();
        match self.session.scan(trigger, &mut self.page, now) {
            Detection::PromptShown => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn late_rendered_form_is_detected_by_interval_scan() {
    let start = tokio::time::Instant::now();
    let empty = PageSnapshot::new(common::pages::APPLY_URL, vec![]);
    let mut page = empty.clone();
    let store = MemoryStore::with_record(StoredRecord::from_profile(common::pages::profile()));
    let session =
        Session::initialize(store, &FormfillConfig::default(), &mut page, start.into_std()).unwrap();
    assert_eq!(session.detection(), Detection::Idle);

    let rendered = PageSnapshot::new(
        common::pages::APPLY_URL,
        vec![FormSnapshot::default()],
    );
    let mut tab = RenderingTab {
        session,
        renders: VecDeque::from([empty, rendered]),
        page,
    };

    let (_changes_tx, changes_rx) = mpsc::channel(4);
    let (_enabled_tx, enabled_rx) = watch::channel(true);
    let scans = driver::run(&mut tab, changes_rx, enabled_rx).await;

    assert_eq!(scans, 2);
    assert!(tab.page.prompt_visible);
    assert!(start.elapsed() >= Duration::from_secs(4));
    assert!(!tab.session.status().monitoring);
}
