//! Fixed-interval poll loop that keeps the presence in sync with the server.
//!
//! Each cycle fetches the status, renders it and publishes it. A failed
//! fetch or publish is logged and the cycle ends early; the loop itself
//! only stops when the shutdown token is cancelled. The interval is
//! measured from the end of one cycle to the start of the next, so a slow
//! upstream delays the schedule instead of overlapping cycles.

use crate::error::PublishError;
use crate::formatter::format_activity;
use crate::traits::{PresenceSink, StatusSource};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Where the scheduler currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Created, nothing scheduled yet.
    NotStarted,
    /// Waiting for the chat gateway to report ready.
    WaitingForGatewayReady,
    /// Querying the upstream API.
    Fetching,
    /// Rendering the presence text.
    Formatting,
    /// Pushing the presence text to the gateway.
    Publishing,
    /// Waiting for the next cycle.
    Sleeping,
}

/// Introspection data owned by the scheduler.
#[derive(Debug, Clone)]
pub struct PollState {
    /// Delay between the end of a cycle and the start of the next.
    pub interval: Duration,
    /// Current lifecycle phase.
    pub phase: PollPhase,
    /// Message of the most recent failure, cleared by a successful cycle.
    pub last_error: Option<String>,
    /// Failed cycles since the last successful publish.
    pub consecutive_failures: u32,
    /// Cycles started so far.
    pub cycles: u64,
    /// Last presence text accepted by the gateway.
    pub last_presence: Option<String>,
}

impl PollState {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            phase: PollPhase::NotStarted,
            last_error: None,
            consecutive_failures: 0,
            cycles: 0,
            last_presence: None,
        }
    }
}

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The presence now shows this text.
    Published(String),
    /// The upstream API failed; nothing was published.
    FetchFailed,
    /// The gateway did not take the update.
    PublishFailed,
}

/// Drives the poll loop for one status source.
pub struct PollScheduler<S> {
    source: S,
    publish_timeout: Duration,
    state: PollState,
}

impl<S: StatusSource> PollScheduler<S> {
    /// Creates a scheduler that waits `interval` between cycles.
    pub fn new(source: S, interval: Duration, publish_timeout: Duration) -> Self {
        Self {
            source,
            publish_timeout,
            state: PollState::new(interval),
        }
    }

    /// Current introspection state.
    pub const fn state(&self) -> &PollState {
        &self.state
    }

    /// Marks the scheduler as waiting for the gateway's ready signal.
    pub fn await_gateway(&mut self) {
        if self.state.phase == PollPhase::NotStarted {
            self.state.phase = PollPhase::WaitingForGatewayReady;
        }
    }

    /// Runs cycles until `shutdown` is cancelled and returns the final state.
    ///
    /// Consumes the scheduler, so a process can only ever run one loop per
    /// scheduler. An in-flight cycle is abandoned on shutdown.
    pub async fn run<P: PresenceSink>(mut self, sink: P, shutdown: CancellationToken) -> PollState {
        info!(
            interval_secs = self.state.interval.as_secs(),
            "Status poller started"
        );

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = self.run_cycle(&sink) => {}
            }

            self.state.phase = PollPhase::Sleeping;
            tokio::select! {
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(self.state.interval) => {}
            }
        }

        info!(cycles = self.state.cycles, "Status poller stopped");
        self.state
    }

    /// Runs one fetch, format and publish cycle.
    pub async fn run_cycle<P: PresenceSink + ?Sized>(&mut self, sink: &P) -> CycleOutcome {
        self.state.cycles += 1;
        self.state.phase = PollPhase::Fetching;

        let record = match self.source.fetch_status().await {
            Ok(record) => record,
            Err(e) => {
                self.record_failure(e.to_string());
                warn!(
                    error = %e,
                    consecutive_failures = self.state.consecutive_failures,
                    "Failed to fetch server status"
                );
                return CycleOutcome::FetchFailed;
            }
        };

        self.state.phase = PollPhase::Formatting;
        let activity = format_activity(&record);

        self.state.phase = PollPhase::Publishing;
        let published = tokio::time::timeout(self.publish_timeout, sink.set_presence(&activity))
            .await
            .unwrap_or(Err(PublishError::Timeout(self.publish_timeout)));

        match published {
            Ok(()) => {
                if self.state.last_presence.as_deref() == Some(activity.as_str()) {
                    debug!(%activity, "Presence unchanged");
                } else {
                    info!(%activity, "Presence updated");
                }
                self.state.last_error = None;
                self.state.consecutive_failures = 0;
                self.state.last_presence = Some(activity.clone());
                CycleOutcome::Published(activity)
            }
            Err(e) => {
                self.record_failure(e.to_string());
                warn!(
                    error = %e,
                    consecutive_failures = self.state.consecutive_failures,
                    "Failed to publish presence"
                );
                CycleOutcome::PublishFailed
            }
        }
    }

    fn record_failure(&mut self, message: String) {
        self.state.last_error = Some(message);
        self.state.consecutive_failures = self.state.consecutive_failures.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::record::StatusRecord;
    use crate::traits::{MockPresenceSink, MockStatusSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const INTERVAL: Duration = Duration::from_secs(60);
    const PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

    fn accepting_sink() -> MockPresenceSink {
        let mut sink = MockPresenceSink::new();
        sink.expect_set_presence().returning(|_| Ok(()));
        sink
    }

    /// Fails on the listed call numbers (starting at 0), succeeds otherwise.
    fn flaky_source(failing_calls: &'static [usize]) -> (MockStatusSource, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut source = MockStatusSource::new();
        source.expect_fetch_status().returning(move || {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            if failing_calls.contains(&call) {
                Err(UpstreamError::HttpStatus { status: 502 })
            } else {
                Ok(StatusRecord::online(10, 100))
            }
        });
        (source, calls)
    }

    #[tokio::test]
    async fn test_successful_cycle_publishes() {
        let mut source = MockStatusSource::new();
        source
            .expect_fetch_status()
            .times(1)
            .returning(|| Ok(StatusRecord::online(7, 50).with_queue(2)));
        let mut sink = MockPresenceSink::new();
        sink.expect_set_presence()
            .withf(|activity| activity.to_string() == "7/50 (+2)")
            .times(1)
            .returning(|_| Ok(()));

        let mut scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        let outcome = scheduler.run_cycle(&sink).await;

        assert_eq!(outcome, CycleOutcome::Published("7/50 (+2)".to_string()));
        assert_eq!(scheduler.state().last_presence.as_deref(), Some("7/50 (+2)"));
        assert_eq!(scheduler.state().consecutive_failures, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_publish() {
        let mut source = MockStatusSource::new();
        source
            .expect_fetch_status()
            .returning(|| Err(UpstreamError::schema("missing 'is_online'")));
        let mut sink = MockPresenceSink::new();
        sink.expect_set_presence().never();

        let mut scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        assert_eq!(scheduler.run_cycle(&sink).await, CycleOutcome::FetchFailed);
        assert_eq!(scheduler.run_cycle(&sink).await, CycleOutcome::FetchFailed);

        let state = scheduler.state();
        assert_eq!(state.consecutive_failures, 2);
        assert!(state.last_error.as_deref().unwrap().contains("is_online"));
        assert_eq!(state.last_presence, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_does_not_republish_stale_text() {
        let (source, _) = flaky_source(&[1]);
        let mut sink = MockPresenceSink::new();
        sink.expect_set_presence().times(2).returning(|_| Ok(()));

        let mut scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        assert!(matches!(scheduler.run_cycle(&sink).await, CycleOutcome::Published(_)));
        assert_eq!(scheduler.run_cycle(&sink).await, CycleOutcome::FetchFailed);
        assert!(matches!(scheduler.run_cycle(&sink).await, CycleOutcome::Published(_)));
        assert_eq!(scheduler.state().consecutive_failures, 0);
        assert_eq!(scheduler.state().last_error, None);
    }

    #[tokio::test]
    async fn test_publish_failure_is_swallowed() {
        let (source, _) = flaky_source(&[]);
        let mut sink = MockPresenceSink::new();
        sink.expect_set_presence()
            .returning(|_| Err(PublishError::Rejected("shard not connected".to_string())));

        let mut scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        assert_eq!(scheduler.run_cycle(&sink).await, CycleOutcome::PublishFailed);
        assert_eq!(scheduler.state().consecutive_failures, 1);
        assert_eq!(scheduler.state().last_presence, None);
    }

    struct StalledSink;

    #[async_trait::async_trait]
    impl PresenceSink for StalledSink {
        async fn set_presence(&self, _activity: &str) -> Result<(), PublishError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_publish_times_out() {
        let (source, _) = flaky_source(&[]);
        let mut scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);

        assert_eq!(scheduler.run_cycle(&StalledSink).await, CycleOutcome::PublishFailed);
        assert!(scheduler.state().last_error.as_deref().unwrap().contains("timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_survives_failed_cycle() {
        let (source, calls) = flaky_source(&[0]);
        let scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(scheduler.run(accepting_sink(), shutdown.clone()));

        // Cycles start at t=0, t=60 and t=120
        tokio::time::sleep(Duration::from_secs(150)).await;
        shutdown.cancel();
        let state = handle.await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(state.cycles, 3);
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.last_presence.as_deref(), Some("10/100"));
        assert_eq!(state.phase, PollPhase::Sleeping);
    }

    /// Takes 30 seconds to answer every fetch.
    struct SlowSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl StatusSource for SlowSource {
        async fn fetch_status(&self) -> Result<StatusRecord, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(StatusRecord::online(1, 10))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_starts_after_publish() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowSource {
            calls: Arc::clone(&calls),
        };
        let scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(scheduler.run(accepting_sink(), shutdown.clone()));

        // Fetches start at t=0 and t=90; a start-to-start schedule would add t=60 and t=120
        tokio::time::sleep(Duration::from_secs(150)).await;
        shutdown.cancel();
        let state = handle.await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.cycles, 2);
        assert_eq!(state.last_presence.as_deref(), Some("1/10"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_first_sleep_ends() {
        let (source, calls) = flaky_source(&[]);
        let scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(scheduler.run(accepting_sink(), shutdown.clone()));
        tokio::time::sleep(Duration::from_secs(1)).await;
        shutdown.cancel();
        let state = handle.await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.cycles, 1);
    }

    #[test]
    fn test_lifecycle_phases() {
        let (source, _) = flaky_source(&[]);
        let mut scheduler = PollScheduler::new(source, INTERVAL, PUBLISH_TIMEOUT);
        assert_eq!(scheduler.state().phase, PollPhase::NotStarted);

        scheduler.await_gateway();
        assert_eq!(scheduler.state().phase, PollPhase::WaitingForGatewayReady);
        assert_eq!(scheduler.state().interval, INTERVAL);
    }
}
