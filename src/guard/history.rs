//! Fixed-capacity history of recent location readings.

use std::collections::VecDeque;

use crate::domain::LocationReading;

/// Default number of readings retained per subject.
pub const DEFAULT_CAPACITY: usize = 10;

/// Ordered FIFO buffer of the most recent readings for one subject.
///
/// Owned exclusively by the spoofing guard and appended on every
/// plausibility check, accepted or not.
#[derive(Debug, Clone)]
pub struct LocationHistory {
    entries: VecDeque<LocationReading>,
    capacity: usize,
}

impl LocationHistory {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty history with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a reading, evicting the oldest once over capacity.
    pub fn push(&mut self, reading: LocationReading) {
        self.entries.push_back(reading);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Most recently appended reading.
    pub fn latest(&self) -> Option<&LocationReading> {
        self.entries.back()
    }

    /// Number of retained readings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no readings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate readings oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LocationReading> {
        self.entries.iter()
    }
}

impl Default for LocationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;
    use chrono::{Duration, Utc};

    fn reading(lat: f64) -> LocationReading {
        LocationReading::new(GeoPoint::new(lat, 107.609810), 10.0, Utc::now())
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut history = LocationHistory::new();
        for i in 0..12 {
            history.push(reading(-6.9 - i as f64 * 0.0001));
        }

        assert_eq!(history.len(), 10);
        // The two oldest entries were evicted.
        let first = history.iter().next().unwrap();
        assert!((first.point.latitude - (-6.9002)).abs() < 1e-9);
    }

    #[test]
    fn test_latest_is_most_recent_push() {
        let mut history = LocationHistory::new();
        let now = Utc::now();
        history.push(LocationReading::new(
            GeoPoint::new(-6.91, 107.60),
            10.0,
            now - Duration::seconds(60),
        ));
        history.push(LocationReading::new(
            GeoPoint::new(-6.92, 107.61),
            10.0,
            now,
        ));

        assert_eq!(history.latest().unwrap().captured_at, now);
    }
}
