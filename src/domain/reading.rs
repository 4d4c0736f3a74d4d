//! Location reading value object produced by the device sensor.

use chrono::{DateTime, Utc};

use super::coordinates::GeoPoint;

/// A single claimed location reading from a device sensor.
///
/// Immutable once produced. `accuracy_m` is the sensor-reported horizontal
/// error radius; implausibly fine values (< 5 m) are characteristic of
/// emulated GPS and are penalized by the spoofing detector.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocationReading {
    /// Claimed position
    pub point: GeoPoint,
    /// Reported horizontal accuracy in meters
    pub accuracy_m: f64,
    /// When the reading was captured
    pub captured_at: DateTime<Utc>,
}

impl LocationReading {
    /// Create a new reading.
    pub fn new(point: GeoPoint, accuracy_m: f64, captured_at: DateTime<Utc>) -> Self {
        Self {
            point,
            accuracy_m,
            captured_at,
        }
    }

    /// Age of the reading relative to `now`, in milliseconds.
    ///
    /// Readings captured in the future (clock skew) report age 0.
    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.captured_at).num_milliseconds().max(0)
    }

    /// Whether the reading is older than the staleness bound.
    pub fn is_stale(&self, now: DateTime<Utc>, max_staleness_ms: u64) -> bool {
        self.age_ms(now) as u64 > max_staleness_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_age_and_staleness() {
        let now = Utc::now();
        let reading = LocationReading::new(
            GeoPoint::new(-6.914744, 107.609810),
            12.0,
            now - Duration::seconds(90),
        );

        assert_eq!(reading.age_ms(now), 90_000);
        assert!(reading.is_stale(now, 60_000));
        assert!(!reading.is_stale(now, 120_000));
    }

    #[test]
    fn test_future_reading_is_not_stale() {
        let now = Utc::now();
        let reading = LocationReading::new(
            GeoPoint::new(-6.914744, 107.609810),
            12.0,
            now + Duration::seconds(5),
        );

        assert_eq!(reading.age_ms(now), 0);
        assert!(!reading.is_stale(now, 60_000));
    }
}
