//! Session state published by a poller.

use crate::domain::position::wire::LastResponse;
use crate::domain::position::{HistoryBuffer, PositionSample, RecordOutcome};
use crate::domain::trend::wire::TrendResponse;
use crate::domain::trend::TrendSummary;
use crate::error::HttpError;
use chrono::{DateTime, Utc};

/// Everything a dashboard renders, as of the last mutation.
///
/// Readers get consistent copies: every field is updated inside a single
/// critical section of the owning poller.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryState {
    /// Latest fetched sample, including ones the history discarded.
    pub position: Option<PositionSample>,
    pub trend: Option<TrendSummary>,
    pub history: HistoryBuffer,
    /// `true` while the recurring timer is active.
    pub running: bool,
    /// `true` while at least one cycle is in flight.
    pub loading: bool,
    /// Failures of the last settled cycle, `None` once a cycle fully succeeds.
    pub error: Option<String>,
    pub last_cycle_at: Option<DateTime<Utc>>,
    pub cycles_completed: u64,
    /// Bumped on every mutation.
    pub revision: u64,
    pub(crate) in_flight: u32,
    pub(crate) epoch: u64,
}

impl TelemetryState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            position: None,
            trend: None,
            history: HistoryBuffer::new(history_capacity),
            running: false,
            loading: false,
            error: None,
            last_cycle_at: None,
            cycles_completed: 0,
            revision: 0,
            in_flight: 0,
            epoch: 0,
        }
    }

    /// Mark a cycle as started; returns the epoch it belongs to.
    pub(crate) fn begin_cycle(&mut self) -> u64 {
        self.in_flight += 1;
        self.loading = true;
        self.revision += 1;
        self.epoch
    }

    /// Apply the joined outcome of one cycle.
    ///
    /// Each side is applied independently: a failed trend never touches the
    /// position or history, and vice versa.
    pub(crate) fn settle_cycle(
        &mut self,
        position: Result<LastResponse, HttpError>,
        trend: Result<TrendResponse, HttpError>,
    ) {
        let mut failures = Vec::new();

        match position {
            Ok(resp) => self.apply_position(resp),
            Err(e) => {
                tracing::warn!(error = %e, "Position fetch failed");
                failures.push(format!("position: {}", e));
            }
        }

        match trend {
            Ok(resp) => self.trend = Some(TrendSummary::from(resp)),
            Err(e) => {
                tracing::warn!(error = %e, "Trend fetch failed");
                failures.push(format!("trend: {}", e));
            }
        }

        self.error = if failures.is_empty() {
            None
        } else {
            Some(failures.join("; "))
        };

        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
        self.last_cycle_at = Some(Utc::now());
        self.cycles_completed += 1;
        self.revision += 1;
    }

    /// Release a cycle that ended without settling (cancelled or panicked).
    /// Returns whether anything changed.
    pub(crate) fn abandon_cycle(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        self.in_flight -= 1;
        self.loading = self.in_flight > 0;
        self.revision += 1;
        true
    }

    /// Mark the recurring timer active. Returns whether anything changed.
    pub(crate) fn resume(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.revision += 1;
        true
    }

    /// Stop accepting scheduled cycles and move to a new epoch so that cycles
    /// started before this call can no longer apply their results.
    ///
    /// Returns whether any visible field changed.
    pub(crate) fn halt(&mut self) -> bool {
        self.epoch += 1;
        self.in_flight = 0;
        let changed = self.running || self.loading;
        self.running = false;
        self.loading = false;
        if changed {
            self.revision += 1;
        }
        changed
    }

    fn apply_position(&mut self, resp: LastResponse) {
        let sample = match resp.into_sample() {
            Ok(Some(sample)) => sample,
            Ok(None) => {
                tracing::debug!("Backend has no position record yet");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed position payload");
                return;
            }
        };

        if sample.has_feed_timestamp() {
            match self.history.record(sample.clone()) {
                RecordOutcome::Appended => {}
                RecordOutcome::Duplicate => {
                    tracing::debug!(timestamp = %sample.timestamp, "Feed has not advanced");
                }
                RecordOutcome::Stale => {
                    tracing::debug!(
                        timestamp = %sample.timestamp,
                        last_seen = ?self.history.last_seen(),
                        "Ignoring out-of-order sample"
                    );
                }
            }
        }

        self.position = Some(sample);
    }
}
