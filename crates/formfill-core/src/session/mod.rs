//! Per-page controller: cached profile, enabled flag, detection state and the
//! rescan scheduler, driven by page scans and extension messages.

mod detection;

pub use detection::Detection;

use std::time::{Duration, Instant};

use serde::Serialize;
use url::Url;

use crate::config::FormfillConfig;
use crate::filler::{fill_form, FillLog};
use crate::message::{Message, Response};
use crate::page::{Notice, Page};
use crate::profile::ProfileData;
use crate::scheduler::{RescanScheduler, ScanTrigger};
use crate::store::{ProfileStore, StoreError, StoreKey};
use crate::view::DomError;

/// Schemes whose pages are never monitored.
const INTERNAL_SCHEMES: [&str; 3] = ["chrome", "chrome-extension", "about"];

/// Why an auto-fill did not run to completion.
#[derive(Debug, thiserror::Error)]
pub enum FillError {
    #[error("no saved profile data")]
    NoStoredData,
    #[error("extension is disabled")]
    Disabled,
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Result of one auto-fill over every form on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub forms: usize,
    pub log: FillLog,
}

impl FillReport {
    pub fn filled(&self) -> usize {
        self.log.filled()
    }
}

/// Diagnostic view of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub enabled: bool,
    pub inert: bool,
    pub monitoring: bool,
    pub data_loaded: bool,
    pub detection: Detection,
}

pub fn is_internal_page(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| INTERNAL_SCHEMES.contains(&u.scheme()))
}

pub struct Session<S: ProfileStore> {
    store: S,
    data: Option<ProfileData>,
    enabled: bool,
    inert: bool,
    detection: Detection,
    scheduler: RescanScheduler,
    prompt_timeout: Duration,
    prompt_deadline: Option<Instant>,
}

impl<S: ProfileStore> Session<S> {
    /// Load cached data and the enabled flag, then start monitoring `page`
    /// unless it is an internal page or the extension is disabled.
    pub fn initialize<P: Page>(
        store: S,
        config: &FormfillConfig,
        page: &mut P,
        now: Instant,
    ) -> Result<Self, StoreError> {
        let mut session = Self {
            store,
            data: None,
            enabled: true,
            inert: is_internal_page(page.url()),
            detection: Detection::Idle,
            scheduler: RescanScheduler::from_config(config),
            prompt_timeout: Duration::from_millis(config.prompt_timeout_ms),
            prompt_deadline: None,
        };
        if session.inert {
            tracing::debug!(url = page.url(), "internal page; session inert");
            return Ok(session);
        }

        let mut keys = StoreKey::GROUPS.to_vec();
        keys.push(StoreKey::ExtensionEnabled);
        let record = session.store.get(&keys)?;
        session.data = record.profile_data();
        session.enabled = record.extension_enabled.unwrap_or(true);
        tracing::info!(
            enabled = session.enabled,
            data_loaded = session.data.is_some(),
            "session initialized"
        );

        if session.enabled {
            session.scheduler.start(now, page.url());
            session.check_for_forms(page, now);
        }
        Ok(session)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn detection(&self) -> Detection {
        self.detection
    }

    pub fn data(&self) -> Option<&ProfileData> {
        self.data.as_ref()
    }

    pub fn scheduler(&self) -> &RescanScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut RescanScheduler {
        &mut self.scheduler
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            enabled: self.enabled,
            inert: self.inert,
            monitoring: self.scheduler.is_running(),
            data_loaded: self.data.is_some(),
            detection: self.detection,
        }
    }

    /// One detection pass. Shows the prompt the first time forms appear.
    pub fn check_for_forms<P: Page>(&mut self, page: &mut P, now: Instant) -> Detection {
        if self.inert || !self.enabled {
            return self.detection;
        }
        if self.data.is_none() {
            tracing::debug!("no profile data; skipping form detection");
            return self.detection;
        }

        let forms = page.form_count();
        tracing::trace!(forms, "form scan");
        if forms == 0 {
            if self.detection == Detection::PromptShown {
                page.remove_prompt();
            }
            self.detection = Detection::Idle;
            self.prompt_deadline = None;
            return self.detection;
        }
        if self.detection == Detection::Idle {
            self.detection = self.detection.on_forms_found();
            tracing::info!(forms, url = page.url(), "form detected; showing prompt");
            page.show_prompt();
            self.detection = self.detection.on_prompt_shown();
            self.prompt_deadline = Some(now + self.prompt_timeout);
        }
        self.detection
    }

    /// SPA navigation: the next scan may prompt again.
    pub fn on_navigation(&mut self) {
        self.detection = Detection::Idle;
        self.prompt_deadline = None;
    }

    /// "Not now" or the close button.
    pub fn dismiss_prompt<P: Page>(&mut self, page: &mut P) {
        page.remove_prompt();
        self.detection = self.detection.on_dismissed();
        self.prompt_deadline = None;
    }

    /// Hide the prompt once its timeout has passed; returns true if it did.
    pub fn expire_prompt<P: Page>(&mut self, page: &mut P, now: Instant) -> bool {
        match self.prompt_deadline {
            Some(deadline) if deadline <= now && self.detection == Detection::PromptShown => {
                tracing::debug!("prompt timed out");
                self.dismiss_prompt(page);
                true
            }
            _ => false,
        }
    }

    /// Fill every form on the page from the cached profile.
    pub fn auto_fill<P: Page>(&mut self, page: &mut P) -> Result<FillReport, FillError> {
        if self.inert || !self.enabled {
            return Err(FillError::Disabled);
        }
        let data = self.data.as_ref().ok_or(FillError::NoStoredData)?;

        let mut report = FillReport::default();
        for index in 0..page.form_count() {
            if let Some(form) = page.form_mut(index) {
                fill_form(form, data, &mut report.log)?;
                report.forms += 1;
            }
        }

        let filled = report.filled();
        tracing::info!(forms = report.forms, filled, "auto-fill finished");
        if filled > 0 {
            page.remove_prompt();
            self.detection = self.detection.on_filled();
            self.prompt_deadline = None;
        }
        Ok(report)
    }

    /// Auto-fill with the outcome turned into a page notice. Returns the notice
    /// shown, if any.
    pub fn run_auto_fill<P: Page>(&mut self, page: &mut P) -> Option<Notice> {
        let notice = match self.auto_fill(page) {
            Ok(report) if report.filled() > 0 => Notice::filled(report.filled()),
            Ok(_) => Notice::no_matching_fields(),
            Err(FillError::NoStoredData) => Notice::no_stored_data(),
            Err(FillError::Disabled) => {
                tracing::debug!("auto-fill blocked: extension disabled");
                return None;
            }
            Err(FillError::Dom(e)) => {
                tracing::warn!("auto-fill aborted: {e}");
                Notice::fill_failed()
            }
        };
        page.notify(notice.clone());
        Some(notice)
    }

    /// Re-read the profile groups; keeps the cache when nothing is stored.
    pub fn reload(&mut self) -> Result<bool, StoreError> {
        let record = self.store.get(&StoreKey::GROUPS)?;
        match record.profile_data() {
            Some(data) => {
                self.data = Some(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_enabled<P: Page>(&mut self, enabled: bool, page: &mut P, now: Instant) {
        let was = self.enabled;
        self.enabled = enabled;
        if self.inert || was == enabled {
            return;
        }
        if enabled {
            self.scheduler.start(now, page.url());
            tracing::info!("form monitoring started");
        } else {
            self.scheduler.stop();
            if page.remove_prompt() {
                tracing::debug!("prompt removed on disable");
            }
            self.on_navigation();
            tracing::info!("form monitoring stopped");
        }
    }

    pub fn handle<P: Page>(&mut self, message: Message, page: &mut P, now: Instant) -> Response {
        tracing::debug!(action = message.action(), "message");
        match message {
            Message::UpdateFormData { data } => {
                self.data = Some(data);
                Response::Updated
            }
            Message::DataUpdated { changes } => {
                if changes.is_empty() || changes.iter().any(|k| k.is_group()) {
                    if let Err(e) = self.reload() {
                        tracing::warn!("reload profile data: {e}");
                    }
                }
                Response::Processed
            }
            Message::ExtensionToggled { enabled } => {
                self.set_enabled(enabled, page, now);
                Response::Processed
            }
            Message::AutoFillFromContextMenu | Message::AutoFillFromKeyboard => {
                self.run_auto_fill(page);
                Response::Processed
            }
        }
    }

    /// Run the scan for `trigger`; navigation scans start from `Idle`.
    pub fn scan<P: Page>(&mut self, trigger: ScanTrigger, page: &mut P, now: Instant) -> Detection {
        if trigger == ScanTrigger::Navigation {
            self.on_navigation();
        }
        self.check_for_forms(page, now)
    }

    /// Expire the prompt and run whatever scan is due at `now`.
    pub fn poll<P: Page>(&mut self, page: &mut P, now: Instant) -> Option<ScanTrigger> {
        self.expire_prompt(page, now);
        let trigger = self.scheduler.poll(now)?;
        self.scan(trigger, page, now);
        Some(trigger)
    }

    pub fn on_structural_change(&mut self, url: &str, now: Instant) -> bool {
        self.scheduler.on_structural_change(url, now)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: ProfileStore + std::fmt::Debug> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("status", &self.status())
            .finish()
    }
}
