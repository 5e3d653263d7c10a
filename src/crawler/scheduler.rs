//! Recurring crawl scheduling
//!
//! This module handles:
//! - Running the crawl once at startup
//! - Re-running it on a fixed interval
//! - Never overlapping runs: a tick that falls due while a run is still in
//!   progress is skipped rather than queued

use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Fixed-interval runner for a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    period: Duration,
}

impl Schedule {
    /// Creates a schedule that fires every `period`
    ///
    /// A zero period disables repetition: the job runs once.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Creates a schedule that fires every `days` days
    pub fn every_days(days: u32) -> Self {
        Self::new(Duration::from_secs(u64::from(days) * SECONDS_PER_DAY))
    }

    /// The time between the starts of consecutive runs
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs `job` now and then once per period, forever
    pub async fn run<F, Fut>(&self, job: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.run_limited(job, None).await;
    }

    /// Runs `job` now and then once per period, at most `max_runs` times
    ///
    /// Runs start on a fixed grid of `period` multiples from the first run.
    /// Each run is awaited to completion; grid points that pass while a run
    /// is in progress are skipped, not made up. With a zero period the job
    /// runs at most once. Returns the number of runs.
    pub async fn run_limited<F, Fut>(&self, mut job: F, max_runs: Option<usize>) -> usize
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut due = Instant::now();
        let mut runs = 0;

        while max_runs.map_or(true, |max| runs < max) {
            sleep_until(due).await;

            runs += 1;
            tracing::info!("Starting scheduled run {}", runs);
            job().await;

            if self.period.is_zero() {
                tracing::warn!("Schedule period is zero; not repeating the run");
                break;
            }

            let finished = Instant::now();
            due += self.period;
            while due <= finished {
                tracing::warn!("Previous run still in progress at a scheduled start; skipping it");
                due += self.period;
            }

            if let Ok(wait) = chrono::Duration::from_std(due - finished) {
                tracing::info!("Next run due at {}", Utc::now() + wait);
            }
        }

        runs
    }
}
