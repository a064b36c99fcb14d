//! Position state containers — session-owned, SDK-provided update logic.

use super::PositionSample;
use crate::shared::{GeoPoint, SeriesPoint};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Default number of samples kept in a session's history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// What [`HistoryBuffer::record`] did with a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The sample was new and was appended.
    Appended,
    /// Same timestamp as the last recorded sample; discarded.
    Duplicate,
    /// Older than the last recorded sample (out-of-order delivery); discarded.
    Stale,
}

impl RecordOutcome {
    pub fn is_appended(&self) -> bool {
        matches!(self, Self::Appended)
    }
}

/// Bounded, chronologically ordered history of position samples.
///
/// Dedup is decided against a single last-seen timestamp, never by scanning the
/// buffer. Oldest entries are evicted first once `capacity` is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    samples: VecDeque<PositionSample>,
    capacity: usize,
    last_seen: Option<DateTime<Utc>>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            last_seen: None,
        }
    }

    /// Record a sample unless it repeats (or predates) the last recorded one.
    pub fn record(&mut self, sample: PositionSample) -> RecordOutcome {
        if let Some(last) = self.last_seen {
            if sample.timestamp == last {
                return RecordOutcome::Duplicate;
            }
            if sample.timestamp < last {
                return RecordOutcome::Stale;
            }
        }

        self.last_seen = Some(sample.timestamp);
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        RecordOutcome::Appended
    }

    pub fn samples(&self) -> &VecDeque<PositionSample> {
        &self.samples
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PositionSample> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&PositionSample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&PositionSample> {
        self.samples.front()
    }

    /// Timestamp of the most recently recorded sample. Survives eviction.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_seen
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples and forget the last-seen marker.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_seen = None;
    }

    // ── Downstream views ─────────────────────────────────────────────────

    /// Map polyline, oldest point first.
    pub fn trail(&self) -> Vec<GeoPoint> {
        self.samples.iter().map(PositionSample::point).collect()
    }

    pub fn velocity_series(&self) -> Vec<SeriesPoint> {
        self.series(|s| s.velocity)
    }

    pub fn altitude_series(&self) -> Vec<SeriesPoint> {
        self.series(|s| s.altitude)
    }

    /// Ground distance covered along the trail, in kilometres.
    pub fn path_length_km(&self) -> f64 {
        self.samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .map(|(a, b)| a.point().distance_km(&b.point()))
            .sum()
    }

    fn series(&self, value: impl Fn(&PositionSample) -> f64) -> Vec<SeriesPoint> {
        self.samples
            .iter()
            .map(|s| SeriesPoint {
                time: s.timestamp,
                value: value(s),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::TimestampSource;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn make_sample(offset_secs: i64) -> PositionSample {
        PositionSample {
            latitude: offset_secs as f64 * 0.01,
            longitude: offset_secs as f64 * 0.05,
            altitude: 410.0 + offset_secs as f64 * 0.001,
            velocity: 27_600.0,
            timestamp: t0() + Duration::seconds(offset_secs),
            visibility: None,
            timestamp_source: TimestampSource::Feed,
        }
    }

    fn offsets(buf: &HistoryBuffer) -> Vec<i64> {
        buf.iter().map(|s| (s.timestamp - t0()).num_seconds()).collect()
    }

    #[test]
    fn test_first_sample_is_appended() {
        let mut buf = HistoryBuffer::new(5);
        assert_eq!(buf.record(make_sample(0)), RecordOutcome::Appended);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.last_seen(), Some(t0()));
    }

    #[test]
    fn test_repeat_timestamp_is_discarded() {
        let mut buf = HistoryBuffer::new(5);
        buf.record(make_sample(0));
        let before = buf.clone();

        // Same observation with drifted fields is still a repeat.
        let mut repeat = make_sample(0);
        repeat.velocity = 1.0;
        assert_eq!(buf.record(repeat), RecordOutcome::Duplicate);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_older_sample_is_stale() {
        let mut buf = HistoryBuffer::new(5);
        buf.record(make_sample(30));
        assert_eq!(buf.record(make_sample(15)), RecordOutcome::Stale);
        assert_eq!(offsets(&buf), [30]);
    }

    #[test]
    fn test_sequence_with_repeats() {
        let mut buf = HistoryBuffer::new(20);
        for offset in [0, 0, 15, 15, 30] {
            buf.record(make_sample(offset));
        }
        assert_eq!(offsets(&buf), [0, 15, 30]);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut buf = HistoryBuffer::new(3);
        for offset in 1..=4 {
            assert!(buf.record(make_sample(offset)).is_appended());
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(offsets(&buf), [2, 3, 4]);
        assert_eq!(buf.oldest().unwrap().timestamp, t0() + Duration::seconds(2));
        assert_eq!(buf.latest().unwrap().timestamp, t0() + Duration::seconds(4));
    }

    #[test]
    fn test_default_capacity_keeps_twenty_most_recent() {
        let mut buf = HistoryBuffer::default();
        for i in 0..25 {
            buf.record(make_sample(i * 15));
        }
        assert_eq!(buf.len(), DEFAULT_HISTORY_CAPACITY);
        let expected: Vec<i64> = (5..25).map(|i| i * 15).collect();
        assert_eq!(offsets(&buf), expected);
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut buf = HistoryBuffer::new(4);
        // Mix of repeats, stale and fresh samples.
        for offset in [5, 5, 1, 6, 7, 7, 2, 8, 9, 10, 10, 11] {
            buf.record(make_sample(offset));
            assert!(buf.len() <= buf.capacity());
        }
        assert_eq!(offsets(&buf), [8, 9, 10, 11]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut buf = HistoryBuffer::new(0);
        assert_eq!(buf.capacity(), 1);
        buf.record(make_sample(1));
        buf.record(make_sample(2));
        assert_eq!(offsets(&buf), [2]);
    }

    #[test]
    fn test_clear_forgets_marker() {
        let mut buf = HistoryBuffer::new(3);
        buf.record(make_sample(1));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.last_seen(), None);
        assert_eq!(buf.record(make_sample(1)), RecordOutcome::Appended);
    }

    #[test]
    fn test_trail_and_series() {
        let mut buf = HistoryBuffer::new(5);
        buf.record(make_sample(0));
        buf.record(make_sample(10));

        let trail = buf.trail();
        assert_eq!(trail, vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.1, 0.5)]);

        let velocity = buf.velocity_series();
        assert_eq!(velocity.len(), 2);
        assert_eq!(velocity[1].time, t0() + Duration::seconds(10));
        assert_eq!(velocity[1].value, 27_600.0);

        let altitude = buf.altitude_series();
        assert!((altitude[1].value - 410.01).abs() < 1e-9);
    }

    #[test]
    fn test_path_length() {
        let mut buf = HistoryBuffer::new(5);
        assert_eq!(buf.path_length_km(), 0.0);
        buf.record(make_sample(0));
        buf.record(make_sample(10));
        buf.record(make_sample(20));
        let direct = GeoPoint::new(0.0, 0.0).distance_km(&GeoPoint::new(0.2, 1.0));
        assert!((buf.path_length_km() - direct).abs() < 0.01);
    }
}
