//! Longitudinal pattern analysis result types.

use super::validation::Confidence;

/// Check-in time-of-day statistics for one subject.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimePattern {
    /// Confidence in the signal, scaled by sample count
    pub confidence: Confidence,
    /// Whether the time pattern is abnormal
    pub is_abnormal: bool,
    /// Mean check-in time in minutes since midnight
    pub mean_minutes: f64,
    /// Standard deviation of check-in time in minutes
    pub stddev_minutes: f64,
}

/// Check-in location clustering statistics.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LocationPattern {
    /// Confidence in the signal, scaled by sample count
    pub confidence: Confidence,
    /// Whether the location pattern is abnormal
    pub is_abnormal: bool,
    /// Number of location clusters found
    pub cluster_count: usize,
    /// Size of the largest cluster
    pub largest_cluster: usize,
    /// Standard deviation of per-point distance to cluster centroid, meters
    pub centroid_stddev_m: f64,
}

/// Device fingerprint uniqueness statistics.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DevicePattern {
    /// Confidence in the signal, scaled by sample count
    pub confidence: Confidence,
    /// Whether the device pattern is abnormal
    pub is_abnormal: bool,
    /// Number of distinct device fingerprints observed
    pub distinct_devices: usize,
}

/// Attendance-rate and lateness statistics.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BehaviorPattern {
    /// Confidence in the signal, scaled by sample count
    pub confidence: Confidence,
    /// Whether the behavior pattern is abnormal
    pub is_abnormal: bool,
    /// Present days over the analysis window, as a percentage
    pub attendance_rate_pct: f64,
    /// Late check-ins over total check-ins, as a percentage
    pub late_frequency_pct: f64,
}

/// Three-tier bucketing of the aggregate anomaly score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RiskLevel {
    /// Score below 30
    Low,
    /// Score below 70
    Medium,
    /// Score 70 and above
    High,
}

impl RiskLevel {
    /// Bucket an aggregate score into a level.
    pub fn from_score(score: u8) -> Self {
        if score < 30 {
            RiskLevel::Low
        } else if score < 70 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// Aggregate risk over the four sub-patterns.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OverallRisk {
    /// `abnormal_count / 4 × 100`
    pub score: u8,
    /// Bucketed level
    pub level: RiskLevel,
    /// One fixed advisory per abnormal sub-pattern, or a single normal advisory
    pub recommendations: Vec<String>,
}

/// Full pattern analysis for one subject over a bounded window.
///
/// Computed fresh on each call from committed history; never persisted by
/// the core itself.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PatternAnalysis {
    /// Check-in time-of-day signal
    pub time: TimePattern,
    /// Check-in location signal
    pub location: LocationPattern,
    /// Device uniqueness signal
    pub device: DevicePattern,
    /// Attendance behavior signal
    pub behavior: BehaviorPattern,
    /// Aggregate risk
    pub overall_risk: OverallRisk,
}

impl PatternAnalysis {
    /// Number of abnormal sub-patterns (0–4).
    pub fn abnormal_count(&self) -> usize {
        [
            self.time.is_abnormal,
            self.location.is_abnormal,
            self.device.is_abnormal,
            self.behavior.is_abnormal,
        ]
        .iter()
        .filter(|a| **a)
        .count()
    }
}
