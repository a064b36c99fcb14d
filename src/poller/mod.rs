//! Telemetry poller — one session of periodic `/last` + `/iss/trend` sampling.
//!
//! - Timer-driven: every tick spawns an independent cycle, so a slow backend
//!   never delays the next tick and overlapping cycles are allowed
//! - Each cycle issues both requests concurrently and settles on the join of both
//! - State lives in a `watch` channel; every mutation is one critical section
//! - `stop()` (and `Drop`) moves the session to a new epoch: cycles started
//!   before it can no longer touch the state

pub mod source;
pub mod state;

pub use source::{SourceFuture, TelemetrySource};
pub use state::TelemetryState;

use crate::config::PollerConfig;

use futures_util::stream::Stream;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

type SharedState = Arc<watch::Sender<TelemetryState>>;

/// A polling session.
///
/// Owns the recurring timer, the history buffer and the last-known-good
/// position and trend. Independent instances never share state.
pub struct Poller<S: TelemetrySource> {
    source: Arc<S>,
    config: PollerConfig,
    state: SharedState,
    timer: Option<JoinHandle<()>>,
}

impl<S: TelemetrySource> Poller<S> {
    /// Create a stopped poller. Nothing is fetched until [`start`](Self::start)
    /// or [`refetch`](Self::refetch).
    pub fn new(source: S, config: PollerConfig) -> Self {
        let (state, _) = watch::channel(TelemetryState::new(config.history_capacity));
        Self {
            source: Arc::new(source),
            config,
            state: Arc::new(state),
            timer: None,
        }
    }

    /// Fetch immediately, then every `config.interval`.
    ///
    /// A no-op while already running. Must be called within a tokio runtime.
    pub fn start(&mut self) {
        if self.timer.is_some() {
            tracing::debug!("Poller already running");
            return;
        }

        let mut epoch = 0;
        self.state.send_if_modified(|s| {
            epoch = s.epoch;
            s.resume()
        });

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let interval = self.config.interval;

        tracing::info!(interval_ms = interval.as_millis() as u64, "Starting ISS poller");

        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tokio::spawn(run_cycle(
                    Arc::clone(&source),
                    Arc::clone(&state),
                    Some(epoch),
                ));
            }
        }));
    }

    /// Cancel the recurring timer and discard any cycle still in flight.
    ///
    /// Once this returns, no scheduled cycle mutates the state. Safe to call
    /// repeatedly; also runs on drop.
    pub fn stop(&mut self) {
        let was_running = self.timer.is_some();
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
        self.state.send_if_modified(|s| s.halt());
        if was_running {
            tracing::info!("Stopped ISS poller");
        }
    }

    /// Run one cycle now and wait for it to settle.
    ///
    /// Independent of the timer: the schedule is neither reset nor restarted,
    /// and it works on a stopped poller too.
    pub async fn refetch(&self) {
        run_cycle(Arc::clone(&self.source), Arc::clone(&self.state), None).await;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> TelemetryState {
        self.state.borrow().clone()
    }

    /// Change-notification receiver; the current value counts as seen.
    pub fn subscribe(&self) -> watch::Receiver<TelemetryState> {
        self.state.subscribe()
    }

    /// Stream of snapshots, one after each change.
    ///
    /// Changes that land before the consumer polls again are coalesced into
    /// the latest snapshot. Ends once the poller and its in-flight cycles are
    /// gone.
    pub fn updates(&self) -> impl Stream<Item = TelemetryState> + Send + 'static {
        futures_util::stream::unfold(self.state.subscribe(), |mut rx| async move {
            if rx.changed().await.is_err() {
                return None;
            }
            let snapshot = rx.borrow_and_update().clone();
            Some((snapshot, rx))
        })
    }
}

impl<S: TelemetrySource> Drop for Poller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One poll cycle.
///
/// `scheduled` carries the epoch the timer was started in; such cycles are
/// refused once the poller has been stopped. Manual cycles pass `None`.
async fn run_cycle<S: TelemetrySource>(source: Arc<S>, state: SharedState, scheduled: Option<u64>) {
    let mut epoch = None;
    state.send_if_modified(|s| {
        if let Some(expected) = scheduled {
            if !s.running || s.epoch != expected {
                return false;
            }
        }
        epoch = Some(s.begin_cycle());
        true
    });
    let Some(epoch) = epoch else {
        tracing::debug!("Skipping cycle scheduled by a stopped poller");
        return;
    };

    let mut guard = CycleGuard {
        state: Arc::clone(&state),
        epoch,
        settled: false,
    };

    let (position, trend) = tokio::join!(source.last_position(), source.trend());

    guard.settled = true;
    let applied = state.send_if_modified(|s| {
        if s.epoch != epoch {
            return false;
        }
        s.settle_cycle(position, trend);
        tracing::debug!(
            cycles_completed = s.cycles_completed,
            history_len = s.history.len(),
            error = ?s.error,
            "Poll cycle settled"
        );
        true
    });

    if !applied {
        tracing::debug!("Discarding results of a cycle from a stopped session");
    }
}

/// Releases a cycle's in-flight slot if it ends before settling, e.g. when a
/// `refetch()` future is dropped or a source panics.
struct CycleGuard {
    state: SharedState,
    epoch: u64,
    settled: bool,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let epoch = self.epoch;
        let released = self
            .state
            .send_if_modified(|s| s.epoch == epoch && s.abandon_cycle());
        if released {
            tracing::debug!("Poll cycle ended before settling");
        }
    }
}
