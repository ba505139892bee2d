//! Recurring one-second tick source.
//!
//! Wraps a single tokio interval. `start` is a no-op while an interval is
//! alive, so at most one timer instance exists at a time.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct TickSource {
    period: Duration,
    interval: Option<Interval>,
}

impl TickSource {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Begin ticking; the first tick lands one period from now.
    pub fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Start or stop to match whether the engine is running.
    pub fn sync(&mut self, running: bool) {
        if running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Wait for the next tick. Pends forever while stopped, which makes it
    /// safe to use as a `tokio::select!` branch.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut source = TickSource::new();
        source.start();
        let begin = Instant::now();
        source.tick().await;
        source.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_source_never_ticks() {
        let mut source = TickSource::new();
        source.start();
        source.stop();
        let waited = tokio::time::timeout(Duration::from_secs(5), source.tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_while_active_keeps_the_same_schedule() {
        let mut source = TickSource::new();
        source.start();
        tokio::time::advance(Duration::from_millis(600)).await;
        source.start();
        let begin = Instant::now();
        source.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn sync_follows_running_flag() {
        let mut source = TickSource::new();
        assert!(!source.is_active());
        source.sync(true);
        assert!(source.is_active());
        source.sync(false);
        assert!(!source.is_active());
    }
}
