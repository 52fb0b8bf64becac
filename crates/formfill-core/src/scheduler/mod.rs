//! Rescan scheduler: one cancellable source of "scan the page for forms" requests.
//!
//! Two event sources feed it: a fixed interval tick (newly rendered forms) and
//! structural-change notifications carrying the current URL (single-page app
//! navigation). A URL change schedules one navigation scan after a short delay;
//! further changes before that deadline coalesce into it. When a tick and a
//! navigation scan are due together the caller gets a single `Navigation` scan.
//!
//! The state machine takes `now` explicitly; `driver` runs it against tokio time.

pub mod driver;

use std::time::{Duration, Instant};

use crate::config::FormfillConfig;

/// Why a scan was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTrigger {
    Interval,
    Navigation,
}

#[derive(Debug, Clone)]
pub struct RescanScheduler {
    interval: Duration,
    navigation_delay: Duration,
    running: bool,
    next_tick: Option<Instant>,
    pending_navigation: Option<Instant>,
    last_url: Option<String>,
}

impl RescanScheduler {
    pub fn new(interval: Duration, navigation_delay: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            navigation_delay,
            running: false,
            next_tick: None,
            pending_navigation: None,
            last_url: None,
        }
    }

    pub fn from_config(cfg: &FormfillConfig) -> Self {
        Self::new(
            Duration::from_millis(cfg.scan_interval_ms),
            Duration::from_millis(cfg.navigation_delay_ms),
        )
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// Arm the interval and the structural observer, with `url` as the baseline.
    /// Returns false (and changes nothing) if already running.
    pub fn start(&mut self, now: Instant, url: &str) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.next_tick = Some(now + self.interval);
        self.pending_navigation = None;
        self.last_url = Some(url.to_string());
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "rescan scheduler started");
        true
    }

    /// Cancel both sources. Stopping a stopped scheduler is a no-op; returns
    /// whether anything was running.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.next_tick = None;
        self.pending_navigation = None;
        tracing::debug!("rescan scheduler stopped");
        true
    }

    /// Structural change observed; schedules a navigation scan if the URL moved.
    /// Returns true if a scan is now pending because of this call.
    pub fn on_structural_change(&mut self, url: &str, now: Instant) -> bool {
        if !self.running || self.last_url.as_deref() == Some(url) {
            return false;
        }
        self.last_url = Some(url.to_string());
        if self.pending_navigation.is_none() {
            self.pending_navigation = Some(now + self.navigation_delay);
        }
        true
    }

    /// Scan due at `now`, if any. Missed ticks are skipped, not replayed.
    pub fn poll(&mut self, now: Instant) -> Option<ScanTrigger> {
        if !self.running {
            return None;
        }
        let navigation_due = self.pending_navigation.is_some_and(|d| d <= now);
        let tick_due = self.next_tick.is_some_and(|t| t <= now);
        if tick_due {
            if let Some(mut next) = self.next_tick {
                while next <= now {
                    next += self.interval;
                }
                self.next_tick = Some(next);
            }
        }
        if navigation_due {
            self.pending_navigation = None;
            return Some(ScanTrigger::Navigation);
        }
        tick_due.then_some(ScanTrigger::Interval)
    }

    /// Earliest instant at which `poll` will return a scan.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.running {
            return None;
        }
        match (self.next_tick, self.pending_navigation) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Number of armed timers: the interval plus a pending navigation scan.
    pub fn armed_timers(&self) -> usize {
        usize::from(self.next_tick.is_some()) + usize::from(self.pending_navigation.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://jobs.example.com/apply";

    fn sched() -> RescanScheduler {
        RescanScheduler::new(Duration::from_millis(2000), Duration::from_millis(1000))
    }

    #[test]
    fn interval_ticks_after_start() {
        let t0 = Instant::now();
        let mut s = sched();
        assert!(s.start(t0, URL));
        assert_eq!(s.poll(t0), None);
        assert_eq!(s.poll(t0 + Duration::from_millis(1999)), None);
        assert_eq!(s.poll(t0 + Duration::from_millis(2000)), Some(ScanTrigger::Interval));
        assert_eq!(s.poll(t0 + Duration::from_millis(2001)), None);
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(4000)));
    }

    #[test]
    fn missed_ticks_are_not_replayed() {
        let t0 = Instant::now();
        let mut s = sched();
        s.start(t0, URL);
        assert_eq!(s.poll(t0 + Duration::from_secs(11)), Some(ScanTrigger::Interval));
        assert_eq!(s.poll(t0 + Duration::from_secs(11)), None);
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_secs(12)));
    }

    #[test]
    fn url_change_schedules_one_debounced_scan() {
        let t0 = Instant::now();
        let mut s = sched();
        s.start(t0, URL);
        assert!(!s.on_structural_change(URL, t0), "same URL is not navigation");
        assert!(s.on_structural_change("https://jobs.example.com/step2", t0 + Duration::from_millis(100)));
        assert!(s.on_structural_change("https://jobs.example.com/step3", t0 + Duration::from_millis(300)));
        assert_eq!(s.armed_timers(), 2);
        assert_eq!(s.poll(t0 + Duration::from_millis(1099)), None);
        assert_eq!(s.poll(t0 + Duration::from_millis(1100)), Some(ScanTrigger::Navigation));
        assert_eq!(s.poll(t0 + Duration::from_millis(1500)), None);
        assert_eq!(s.armed_timers(), 1);
    }

    #[test]
    fn tick_and_navigation_due_together_coalesce() {
        let t0 = Instant::now();
        let mut s = sched();
        s.start(t0, URL);
        s.on_structural_change("https://jobs.example.com/next", t0 + Duration::from_millis(1500));
        // Tick due at 2000, navigation due at 2500: one scan at 2600.
        assert_eq!(s.poll(t0 + Duration::from_millis(2600)), Some(ScanTrigger::Navigation));
        assert_eq!(s.poll(t0 + Duration::from_millis(2600)), None);
    }

    #[test]
    fn stop_is_idempotent_and_cancels_everything() {
        let t0 = Instant::now();
        let mut s = sched();
        assert!(!s.stop());
        s.start(t0, URL);
        s.on_structural_change("https://jobs.example.com/next", t0);
        assert!(s.stop());
        assert!(!s.stop());
        assert_eq!(s.armed_timers(), 0);
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.poll(t0 + Duration::from_secs(60)), None);
        assert!(!s.on_structural_change("https://jobs.example.com/other", t0));
    }

    #[test]
    fn restart_does_not_duplicate_timers() {
        let t0 = Instant::now();
        let mut s = sched();
        assert!(s.start(t0, URL));
        assert!(!s.start(t0 + Duration::from_millis(500), URL));
        assert_eq!(s.armed_timers(), 1);
        s.stop();
        assert!(s.start(t0 + Duration::from_secs(1), URL));
        assert_eq!(s.armed_timers(), 1);
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_secs(3)));
    }
}
