//! Longitudinal behavioral pattern analysis.

use tracing::info;

use crate::domain::{
    AttendanceEvent, BehaviorPattern, Confidence, DevicePattern, GeoPoint, LocationPattern,
    OverallRisk, PatternAnalysis, RiskLevel, TimePattern,
};

use super::clustering::cluster_points;
use super::stats::{mean, stddev};

/// Analyzer thresholds.
///
/// The defaults mirror the reference deployment and are judgment calls,
/// not validated security parameters; override them per site.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Default length of the analysis window in days
    pub window_days: u32,
    /// Check-ins after this many minutes since midnight count as late
    pub late_cutoff_minutes: u32,
    /// Check-in time stddev above this is abnormal, minutes
    pub time_stddev_threshold_min: f64,
    /// Merge radius for location clustering, meters
    pub cluster_radius_m: f64,
    /// More clusters than this is abnormal
    pub max_clusters: usize,
    /// Centroid-distance stddev above this is abnormal, meters
    pub centroid_stddev_threshold_m: f64,
    /// More distinct devices than this is abnormal
    pub max_devices: usize,
    /// Attendance rate below this percentage is abnormal
    pub min_attendance_rate_pct: f64,
    /// Late frequency above this percentage is abnormal
    pub max_late_frequency_pct: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            late_cutoff_minutes: 450, // 07:30
            time_stddev_threshold_min: 30.0,
            cluster_radius_m: 10.0,
            max_clusters: 3,
            centroid_stddev_threshold_m: 50.0,
            max_devices: 2,
            min_attendance_rate_pct: 80.0,
            max_late_frequency_pct: 20.0,
        }
    }
}

/// Fixed advisories, one per abnormal sub-pattern.
const ADVISORY_TIME: &str = "inconsistent check-in time pattern; needs further monitoring";
const ADVISORY_LOCATION: &str =
    "check-ins scattered across multiple locations; verify presence on site";
const ADVISORY_DEVICE: &str =
    "multiple devices used for check-in; possible proxy attendance (titip presensi)";
const ADVISORY_BEHAVIOR: &str = "low attendance rate or frequent lateness; follow up directly";
const ADVISORY_NORMAL: &str = "attendance pattern looks normal";

/// Scores a subject's attendance history for anomalies.
///
/// Pure, read-only batch computation: it may run concurrently with live
/// check-ins and requires no locking.
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: AnalyzerConfig,
}

impl PatternAnalyzer {
    /// Create an analyzer with the given thresholds.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// The configured analysis window in days.
    pub fn window_days(&self) -> u32 {
        self.config.window_days
    }

    /// Analyze a window of committed events for one subject.
    ///
    /// `window_days` is the span the events were loaded over; it sets the
    /// attendance-rate denominator, so it must match the load query.
    /// An empty history yields confidence 0 and no abnormal flags for
    /// every sub-pattern: insufficient data is not evidence of fraud.
    pub fn analyze(&self, events: &[AttendanceEvent], window_days: u32) -> PatternAnalysis {
        let time = self.time_pattern(events);
        let location = self.location_pattern(events);
        let device = self.device_pattern(events);
        let behavior = self.behavior_pattern(events, window_days);

        let abnormal = [
            time.is_abnormal,
            location.is_abnormal,
            device.is_abnormal,
            behavior.is_abnormal,
        ]
        .iter()
        .filter(|a| **a)
        .count();

        let score = (abnormal as f64 / 4.0 * 100.0).round() as u8;
        let level = RiskLevel::from_score(score);

        let mut recommendations = Vec::new();
        if time.is_abnormal {
            recommendations.push(ADVISORY_TIME.to_string());
        }
        if location.is_abnormal {
            recommendations.push(ADVISORY_LOCATION.to_string());
        }
        if device.is_abnormal {
            recommendations.push(ADVISORY_DEVICE.to_string());
        }
        if behavior.is_abnormal {
            recommendations.push(ADVISORY_BEHAVIOR.to_string());
        }
        if recommendations.is_empty() {
            recommendations.push(ADVISORY_NORMAL.to_string());
        }

        info!(
            events = events.len(),
            abnormal, score, %level,
            "pattern analysis complete"
        );

        PatternAnalysis {
            time,
            location,
            device,
            behavior,
            overall_risk: OverallRisk {
                score,
                level,
                recommendations,
            },
        }
    }

    fn time_pattern(&self, events: &[AttendanceEvent]) -> TimePattern {
        if events.is_empty() {
            return TimePattern {
                confidence: Confidence::zero(),
                is_abnormal: false,
                mean_minutes: 0.0,
                stddev_minutes: 0.0,
            };
        }

        let minutes: Vec<f64> = events.iter().map(|e| e.check_in_minutes() as f64).collect();
        let stddev_minutes = stddev(&minutes);

        TimePattern {
            confidence: Confidence::new((events.len() as i64 * 10).min(100)),
            is_abnormal: stddev_minutes > self.config.time_stddev_threshold_min,
            mean_minutes: mean(&minutes),
            stddev_minutes,
        }
    }

    fn location_pattern(&self, events: &[AttendanceEvent]) -> LocationPattern {
        if events.is_empty() {
            return LocationPattern {
                confidence: Confidence::zero(),
                is_abnormal: false,
                cluster_count: 0,
                largest_cluster: 0,
                centroid_stddev_m: 0.0,
            };
        }

        let points: Vec<GeoPoint> = events.iter().map(|e| e.location).collect();
        let clusters = cluster_points(&points, self.config.cluster_radius_m);

        // Per-point distance to its own cluster's centroid.
        let distances: Vec<f64> = clusters
            .iter()
            .flat_map(|c| c.points.iter().map(|p| c.centroid.distance_to(p)))
            .collect();
        let centroid_stddev_m = stddev(&distances);

        LocationPattern {
            confidence: Confidence::new((events.len() as i64 * 5).min(100)),
            is_abnormal: clusters.len() > self.config.max_clusters
                || centroid_stddev_m > self.config.centroid_stddev_threshold_m,
            cluster_count: clusters.len(),
            largest_cluster: clusters.first().map(|c| c.count()).unwrap_or(0),
            centroid_stddev_m,
        }
    }

    fn device_pattern(&self, events: &[AttendanceEvent]) -> DevicePattern {
        if events.is_empty() {
            return DevicePattern {
                confidence: Confidence::zero(),
                is_abnormal: false,
                distinct_devices: 0,
            };
        }

        let distinct: std::collections::HashSet<&str> = events
            .iter()
            .map(|e| e.device_fingerprint.as_str())
            .collect();

        DevicePattern {
            confidence: Confidence::new((events.len() as i64 * 3).min(100)),
            is_abnormal: distinct.len() > self.config.max_devices,
            distinct_devices: distinct.len(),
        }
    }

    fn behavior_pattern(&self, events: &[AttendanceEvent], window_days: u32) -> BehaviorPattern {
        if events.is_empty() {
            return BehaviorPattern {
                confidence: Confidence::zero(),
                is_abnormal: false,
                attendance_rate_pct: 0.0,
                late_frequency_pct: 0.0,
            };
        }

        let total = events.len();
        let late = events
            .iter()
            .filter(|e| e.check_in_minutes() > self.config.late_cutoff_minutes)
            .count();

        let attendance_rate_pct = total as f64 / window_days.max(1) as f64 * 100.0;
        let late_frequency_pct = late as f64 / total as f64 * 100.0;

        BehaviorPattern {
            confidence: Confidence::new((total as i64 * 5).min(100)),
            is_abnormal: attendance_rate_pct < self.config.min_attendance_rate_pct
                || late_frequency_pct > self.config.max_late_frequency_pct,
            attendance_rate_pct,
            late_frequency_pct,
        }
    }
}
