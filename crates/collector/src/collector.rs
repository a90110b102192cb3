//! The periodic collector: stopped -> running -> stopped.
//!
//! While running, a background task fires [`CycleRunner::collect_all`] on a
//! fixed interval until its [`CancellationToken`] is triggered. The first
//! cycle starts immediately; a cycle that overruns the interval delays the
//! next tick instead of bursting to catch up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use hc_core::types::DbId;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::cycle::{CycleReport, CycleRunner};
use crate::error::CollectError;

/// Default interval between collection cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

struct RunningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Background service that keeps the cache fresh.
pub struct Collector {
    runner: CycleRunner,
    interval: Duration,
    running: AtomicBool,
    task: Mutex<Option<RunningTask>>,
}

impl Collector {
    pub fn new(runner: CycleRunner, interval: Duration) -> Self {
        Self {
            runner,
            interval,
            running: AtomicBool::new(false),
            task: Mutex::new(None),
        }
    }

    pub fn runner(&self) -> &CycleRunner {
        &self.runner
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start the periodic loop. Returns `false` (and warns) when already running.
    pub async fn start(&self) -> bool {
        let mut slot = self.task.lock().await;
        if slot.is_some() {
            tracing::warn!("Collector already running");
            return false;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(self.runner.clone(), self.interval, cancel.clone()));
        *slot = Some(RunningTask { cancel, handle });
        self.running.store(true, Ordering::SeqCst);

        tracing::info!(interval_secs = self.interval.as_secs(), "Collector started");
        true
    }

    /// Stop the periodic loop and wait for it to exit.
    ///
    /// A cycle already in flight finishes first. The collector counts as
    /// stopped as soon as the loop is cancelled, so dropping this future
    /// while it waits leaves no stale running state. Returns `false` when
    /// the collector was not running.
    pub async fn stop(&self) -> bool {
        let Some(task) = self.task.lock().await.take() else {
            tracing::debug!("Collector not running");
            return false;
        };

        task.cancel.cancel();
        self.running.store(false, Ordering::SeqCst);
        if let Err(e) = task.handle.await {
            tracing::error!(error = %e, "Collector task ended abnormally");
        }

        tracing::info!("Collector stopped");
        true
    }

    /// Run one cycle now, outside the schedule.
    pub async fn collect_all(&self) -> Result<CycleReport, CollectError> {
        self.runner.collect_all().await
    }

    /// Fetch and persist a single planet outside the schedule.
    pub async fn collect_planet_data(&self, index: DbId) -> Option<Value> {
        self.runner.collect_planet_data(index).await
    }
}

async fn run(runner: CycleRunner, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Collector loop stopping");
                break;
            }
            _ = interval.tick() => {
                // Outcome is logged and reflected in the upstream flag.
                let _ = runner.collect_all().await;
            }
        }
    }
}
