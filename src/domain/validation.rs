//! Geofence validation result types.

/// A 0–100 heuristic trust value, not a calibrated probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Confidence(u8);

impl Confidence {
    /// Create a confidence score, clamped to [0, 100].
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// Get the raw value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Confidence of exactly zero.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Full confidence.
    pub fn full() -> Self {
        Self(100)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signal channels the validator can corroborate a position with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SignalChannel {
    /// Primary GPS position
    Gps,
    /// Wi-Fi network scan
    Wifi,
    /// Bluetooth device scan
    Bluetooth,
    /// Cellular tower scan
    Cellular,
}

impl std::fmt::Display for SignalChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignalChannel::Gps => "gps",
            SignalChannel::Wifi => "wifi",
            SignalChannel::Bluetooth => "bluetooth",
            SignalChannel::Cellular => "cellular",
        };
        write!(f, "{}", name)
    }
}

/// Per-channel sub-score of a geofence validation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignalScore {
    /// Channel confidence (0–100)
    pub confidence: Confidence,
    /// Supporting detail for display
    pub detail: String,
    /// Identifiers that matched the zone's known-good set (empty for GPS)
    pub matched: Vec<String>,
}

impl SignalScore {
    /// Score for a channel whose signal source was unavailable.
    pub fn unavailable() -> Self {
        Self {
            confidence: Confidence::zero(),
            detail: "signal source unavailable".to_string(),
            matched: Vec::new(),
        }
    }
}

/// Weighted combination of all channel sub-scores.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OverallScore {
    /// Weighted score rounded to the nearest integer (0–100)
    pub score: u8,
    /// Whether the score clears the acceptance threshold
    pub is_valid: bool,
    /// Human-readable risk findings, in insertion order
    pub risks: Vec<String>,
}

/// Result of one geofence validation call.
///
/// Created fresh per call and never mutated after return.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GeofenceValidation {
    /// GPS sub-score
    pub gps: SignalScore,
    /// Wi-Fi sub-score
    pub wifi: SignalScore,
    /// Bluetooth sub-score
    pub bluetooth: SignalScore,
    /// Cellular sub-score
    pub cellular: SignalScore,
    /// Combined verdict
    pub overall: OverallScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Confidence::new(150).value(), 100);
        assert_eq!(Confidence::new(-20).value(), 0);
        assert_eq!(Confidence::new(73).value(), 73);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(SignalChannel::Gps.to_string(), "gps");
        assert_eq!(SignalChannel::Cellular.to_string(), "cellular");
    }

    #[test]
    fn test_unavailable_score() {
        let score = SignalScore::unavailable();
        assert_eq!(score.confidence.value(), 0);
        assert!(score.matched.is_empty());
    }
}
