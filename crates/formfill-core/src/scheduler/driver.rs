//! Tokio driver for [`RescanScheduler`]: sleeps until the next deadline and feeds
//! URL changes and enable/disable flips into the state machine.

use std::ops::ControlFlow;
use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tokio::time;

use super::{RescanScheduler, ScanTrigger};

/// Owner of a scheduler that performs the actual scans.
pub trait ScanTarget {
    fn scheduler(&mut self) -> &mut RescanScheduler;
    fn on_scan(&mut self, trigger: ScanTrigger) -> ControlFlow<()>;

    /// Enabled switch flipped (also called once with the initial value).
    /// The default only starts or stops the scheduler.
    fn on_enabled(&mut self, on: bool) {
        let scheduler = self.scheduler();
        if !on {
            scheduler.stop();
        } else if !scheduler.is_running() {
            let url = scheduler.last_url().unwrap_or_default().to_string();
            scheduler.start(now(), &url);
        }
    }
}

fn now() -> Instant {
    time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(d) => time::sleep_until(time::Instant::from_std(d)).await,
        None => std::future::pending().await,
    }
}

/// Run until the change channel closes or `on_scan` breaks. Every flip of
/// `enabled` goes through [`ScanTarget::on_enabled`]; while it reads false
/// only channel events are processed.
/// Returns the number of scans performed; the scheduler is stopped on return.
pub async fn run<T: ScanTarget>(
    target: &mut T,
    mut changes: mpsc::Receiver<String>,
    mut enabled: watch::Receiver<bool>,
) -> usize {
    let mut scans = 0;
    let mut enabled_open = true;
    let mut applied = None;
    loop {
        let on = *enabled.borrow_and_update();
        if applied != Some(on) {
            tracing::debug!(on, "enabled switch");
            target.on_enabled(on);
            applied = Some(on);
        }
        let deadline = target.scheduler().next_deadline();

        tokio::select! {
            _ = sleep_until(deadline) => {
                if let Some(trigger) = target.scheduler().poll(now()) {
                    scans += 1;
                    tracing::trace!(?trigger, scans, "scan");
                    if target.on_scan(trigger).is_break() {
                        break;
                    }
                }
            }
            change = changes.recv() => match change {
                Some(url) => {
                    target.scheduler().on_structural_change(&url, now());
                }
                None => break,
            },
            res = enabled.changed(), if enabled_open => {
                if res.is_err() {
                    enabled_open = false;
                }
            }
        }
    }
    target.scheduler().stop();
    scans
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Recorder {
        scheduler: RescanScheduler,
        seen: Vec<ScanTrigger>,
        limit: usize,
    }

    impl Recorder {
        fn new(limit: usize) -> Self {
            let mut scheduler =
                RescanScheduler::new(Duration::from_secs(2), Duration::from_secs(1));
            scheduler.start(now(), "https://jobs.example.com/apply");
            Self {
                scheduler,
                seen: Vec::new(),
                limit,
            }
        }
    }

    impl ScanTarget for Recorder {
        fn scheduler(&mut self) -> &mut RescanScheduler {
            &mut self.scheduler
        }

        fn on_scan(&mut self, trigger: ScanTrigger) -> ControlFlow<()> {
            self.seen.push(trigger);
            if self.seen.len() >= self.limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn interval_scans_until_callback_breaks() {
        let start = time::Instant::now();
        let (_tx, rx) = mpsc::channel(4);
        let (_en, en_rx) = watch::channel(true);
        let mut target = Recorder::new(3);

        let scans = run(&mut target, rx, en_rx).await;

        assert_eq!(scans, 3);
        assert_eq!(target.seen, vec![ScanTrigger::Interval; 3]);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(6) && elapsed < Duration::from_secs(7));
        assert!(!target.scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn url_change_triggers_navigation_scan() {
        let start = time::Instant::now();
        let (tx, rx) = mpsc::channel(4);
        let (_en, en_rx) = watch::channel(true);
        tx.send("https://jobs.example.com/step2".to_string())
            .await
            .unwrap();
        let mut target = Recorder::new(1);

        run(&mut target, rx, en_rx).await;

        assert_eq!(target.seen, vec![ScanTrigger::Navigation]);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_ends_the_loop() {
        let (tx, rx) = mpsc::channel::<String>(1);
        drop(tx);
        let (_en, en_rx) = watch::channel(true);
        let mut target = Recorder::new(10);

        assert_eq!(run(&mut target, rx, en_rx).await, 0);
        assert!(!target.scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_pauses_until_enabled() {
        let start = time::Instant::now();
        let (_tx, rx) = mpsc::channel(4);
        let (en_tx, en_rx) = watch::channel(false);
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(5)).await;
            en_tx.send(true).unwrap();
        });
        let mut target = Recorder::new(1);

        run(&mut target, rx, en_rx).await;

        assert_eq!(target.seen, vec![ScanTrigger::Interval]);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(7) && elapsed < Duration::from_secs(8));
    }

    /// Records switch flips and scans, keeping its scheduler in step.
    struct Switchboard {
        inner: Recorder,
        flips: Vec<bool>,
    }

    impl ScanTarget for Switchboard {
        fn scheduler(&mut self) -> &mut RescanScheduler {
            self.inner.scheduler()
        }

        fn on_scan(&mut self, trigger: ScanTrigger) -> ControlFlow<()> {
            self.inner.on_scan(trigger)
        }

        fn on_enabled(&mut self, on: bool) {
            self.flips.push(on);
            self.inner.on_enabled(on);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn each_flip_reaches_the_target_once() {
        let (_tx, rx) = mpsc::channel(4);
        let (en_tx, en_rx) = watch::channel(true);
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(500)).await;
            en_tx.send(false).unwrap();
            en_tx.send(false).unwrap();
            time::sleep(Duration::from_secs(3)).await;
            en_tx.send(true).unwrap();
            time::sleep(Duration::from_secs(60)).await;
        });
        let mut target = Switchboard {
            inner: Recorder::new(1),
            flips: Vec::new(),
        };

        run(&mut target, rx, en_rx).await;

        assert_eq!(target.flips, vec![true, false, true]);
        assert_eq!(target.inner.seen, vec![ScanTrigger::Interval]);
    }
}
