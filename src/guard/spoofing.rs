//! Location plausibility scoring against spoofing signatures.

use tracing::debug;

use crate::domain::{Confidence, GeoPoint, LocationReading};

use super::history::LocationHistory;

/// Thresholds and penalties for the plausibility check.
#[derive(Debug, Clone)]
pub struct SpoofingConfig {
    /// Accuracy below this is characteristic of emulated GPS, meters
    pub fine_accuracy_m: f64,
    /// Penalty for implausibly fine accuracy
    pub fine_accuracy_penalty: i64,
    /// Implied speed above this flags teleportation, meters per second
    pub max_speed_mps: f64,
    /// Penalty for a teleportation jump
    pub teleport_penalty: i64,
    /// Penalty for a suspicious coordinate pattern
    pub pattern_penalty: i64,
    /// Minimum confidence for the reading to pass
    pub valid_threshold: u8,
    /// Readings within this distance of a registered reference point are
    /// suspicious, meters
    pub reference_proximity_m: f64,
}

impl Default for SpoofingConfig {
    fn default() -> Self {
        Self {
            fine_accuracy_m: 5.0,
            fine_accuracy_penalty: 20,
            max_speed_mps: 50.0,
            teleport_penalty: 40,
            pattern_penalty: 30,
            valid_threshold: 60,
            reference_proximity_m: 1.0,
        }
    }
}

/// Result of one plausibility assessment.
#[derive(Debug, Clone)]
pub struct SpoofingAssessment {
    /// Remaining confidence after all deductions
    pub confidence: Confidence,
    /// Whether the reading clears the threshold
    pub is_valid: bool,
    /// Human-readable findings, one per triggered deduction
    pub flags: Vec<String>,
}

/// Scores a reading for fake-GPS signatures.
///
/// The reference point denylist is deployment configuration: real devices
/// have sensor noise and essentially never report a registered coordinate
/// exactly, so a reading within 1 m of one is treated as typed in.
#[derive(Debug, Clone, Default)]
pub struct SpoofingDetector {
    config: SpoofingConfig,
    reference_points: Vec<GeoPoint>,
}

impl SpoofingDetector {
    /// Create a detector with the given thresholds.
    pub fn new(config: SpoofingConfig) -> Self {
        Self {
            config,
            reference_points: Vec::new(),
        }
    }

    /// Register fixed reference points for the proximity denylist
    /// (e.g. a zone's published coordinates).
    pub fn with_reference_points(mut self, points: Vec<GeoPoint>) -> Self {
        self.reference_points = points;
        self
    }

    /// Assess a reading against the subject's recent history.
    ///
    /// Pure with respect to the history: appending the reading afterwards
    /// is the caller's job (the guard does it on every call).
    pub fn assess(&self, reading: &LocationReading, history: &LocationHistory) -> SpoofingAssessment {
        let mut confidence: i64 = 100;
        let mut flags = Vec::new();

        if reading.accuracy_m < self.config.fine_accuracy_m {
            confidence -= self.config.fine_accuracy_penalty;
            flags.push(format!(
                "reported accuracy {:.1} m is implausibly precise",
                reading.accuracy_m
            ));
        }

        if let Some(previous) = history.latest() {
            if self.implies_teleport(previous, reading) {
                confidence -= self.config.teleport_penalty;
                flags.push("teleportation: implied speed exceeds plausible travel".to_string());
            }
        }

        if self.matches_suspicious_pattern(&reading.point) {
            confidence -= self.config.pattern_penalty;
            flags.push("suspicious pattern: coordinates match a spoofing signature".to_string());
        }

        let confidence = Confidence::new(confidence);
        let is_valid = confidence.value() >= self.config.valid_threshold;
        debug!(
            confidence = confidence.value(),
            is_valid,
            flag_count = flags.len(),
            "spoofing assessment complete"
        );

        SpoofingAssessment {
            confidence,
            is_valid,
            flags,
        }
    }

    /// Implied speed between the previous reading and this one exceeds
    /// the plausible maximum.
    fn implies_teleport(&self, previous: &LocationReading, reading: &LocationReading) -> bool {
        let distance_m = previous.point.distance_to(&reading.point);
        let elapsed_s =
            (reading.captured_at - previous.captured_at).num_milliseconds() as f64 / 1000.0;

        if elapsed_s <= 0.0 {
            // Same-instant or out-of-order timestamps: any displacement is
            // an infinite implied speed.
            return distance_m > 0.0;
        }

        distance_m / elapsed_s > self.config.max_speed_mps
    }

    /// Denylist of coordinate patterns that real sensors do not produce.
    fn matches_suspicious_pattern(&self, point: &GeoPoint) -> bool {
        if point.latitude == 0.0 && point.longitude == 0.0 {
            return true;
        }

        if self
            .reference_points
            .iter()
            .any(|r| r.distance_to(point) < self.config.reference_proximity_m)
        {
            return true;
        }

        has_zero_run(point.latitude) || has_zero_run(point.longitude)
    }
}

/// A coordinate printed at six decimal places whose fraction contains a
/// run of four or more zeros. Sensor noise essentially never produces
/// this; hand-typed values like `-6.2` always do.
fn has_zero_run(value: f64) -> bool {
    let printed = format!("{:.6}", value.abs());
    match printed.split_once('.') {
        Some((_, fraction)) => fraction.contains("0000"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn reading(point: GeoPoint, accuracy_m: f64) -> LocationReading {
        LocationReading::new(point, accuracy_m, Utc::now())
    }

    fn noisy_point() -> GeoPoint {
        GeoPoint::new(-6.914327, 107.609581)
    }

    #[test]
    fn test_clean_reading_scores_100() {
        let detector = SpoofingDetector::default();
        let result = detector.assess(&reading(noisy_point(), 8.0), &LocationHistory::new());

        assert_eq!(result.confidence.value(), 100);
        assert!(result.is_valid);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_fine_accuracy_drops_to_80() {
        let detector = SpoofingDetector::default();
        let result = detector.assess(&reading(noisy_point(), 3.0), &LocationHistory::new());

        assert_eq!(result.confidence.value(), 80);
        assert!(result.is_valid);
        assert_eq!(result.flags.len(), 1);
    }

    #[test]
    fn test_fine_accuracy_plus_teleport_drops_to_40() {
        let detector = SpoofingDetector::default();
        let now = Utc::now();

        let mut history = LocationHistory::new();
        // Previous reading 10 km away, 60 seconds earlier: ~167 m/s.
        history.push(LocationReading::new(
            GeoPoint::new(-6.824327, 107.609581),
            10.0,
            now - Duration::seconds(60),
        ));

        let current = LocationReading::new(noisy_point(), 3.0, now);
        let result = detector.assess(&current, &history);

        assert_eq!(result.confidence.value(), 40);
        assert!(!result.is_valid);
        assert!(result.flags.iter().any(|f| f.contains("teleportation")));
    }

    #[test]
    fn test_slow_movement_is_not_teleportation() {
        let detector = SpoofingDetector::default();
        let now = Utc::now();

        let mut history = LocationHistory::new();
        // ~100 m in 60 seconds: well under 50 m/s.
        history.push(LocationReading::new(
            GeoPoint::new(-6.915226, 107.609581),
            10.0,
            now - Duration::seconds(60),
        ));

        let result = detector.assess(&LocationReading::new(noisy_point(), 8.0, now), &history);
        assert_eq!(result.confidence.value(), 100);
    }

    #[test]
    fn test_null_island_is_suspicious() {
        let detector = SpoofingDetector::default();
        let result = detector.assess(
            &reading(GeoPoint::new(0.0, 0.0), 8.0),
            &LocationHistory::new(),
        );

        assert_eq!(result.confidence.value(), 70);
        assert!(result.flags.iter().any(|f| f.contains("suspicious pattern")));
    }

    #[test]
    fn test_registered_reference_point_is_suspicious() {
        let center = GeoPoint::new(-6.914744, 107.609810);
        let detector = SpoofingDetector::default().with_reference_points(vec![center]);

        // The exact published coordinate.
        let result = detector.assess(&reading(center, 8.0), &LocationHistory::new());
        assert_eq!(result.confidence.value(), 70);

        // 30 m away is fine.
        let nearby = GeoPoint::new(-6.914474, 107.609810);
        let result = detector.assess(&reading(nearby, 8.0), &LocationHistory::new());
        assert_eq!(result.confidence.value(), 100);
    }

    #[test]
    fn test_zero_run_coordinates_are_suspicious() {
        let detector = SpoofingDetector::default();
        // -6.2 prints as -6.200000: a typed-in value.
        let result = detector.assess(
            &reading(GeoPoint::new(-6.2, 107.609581), 8.0),
            &LocationHistory::new(),
        );

        assert_eq!(result.confidence.value(), 70);
    }

    #[test]
    fn test_noisy_coordinates_have_no_zero_run() {
        assert!(!has_zero_run(-6.914327));
        assert!(!has_zero_run(107.609581));
        assert!(has_zero_run(107.61));
        assert!(has_zero_run(0.000001));
    }
}
