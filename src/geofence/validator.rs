//! Geofence validator combining GPS with auxiliary signal scans.

use tracing::{debug, warn};

use crate::domain::{
    Confidence, GeofenceValidation, GeofenceZone, LocationReading, OverallScore,
    SignalChannel, SignalScore,
};
use crate::integration::SignalScanner;

/// Thresholds and weights for geofence validation.
///
/// The numeric defaults are engineering judgment calls inherited from the
/// reference deployment, not validated security parameters; treat them as
/// tunable configuration.
#[derive(Debug, Clone)]
pub struct GeofenceValidatorConfig {
    /// Minimum overall score to accept a reading
    pub valid_threshold: u8,
    /// Overall score below which a low-score risk is recorded
    pub low_score_threshold: u8,
    /// GPS accuracy below this is suspiciously fine (emulated GPS)
    pub fine_accuracy_m: f64,
    /// Confidence points per matched Wi-Fi network (4 networks saturate)
    pub wifi_match_weight: u32,
    /// Confidence points per matched Bluetooth/cellular identifier
    pub aux_match_weight: u32,
    /// Weight of the GPS sub-score in the overall combination
    pub gps_weight: f64,
    /// Weight of the Wi-Fi sub-score
    pub wifi_weight: f64,
    /// Weight of the Bluetooth sub-score
    pub bluetooth_weight: f64,
    /// Weight of the cellular sub-score
    pub cellular_weight: f64,
}

impl Default for GeofenceValidatorConfig {
    fn default() -> Self {
        Self {
            valid_threshold: 70,
            low_score_threshold: 50,
            fine_accuracy_m: 5.0,
            wifi_match_weight: 25,
            aux_match_weight: 33,
            gps_weight: 0.40,
            wifi_weight: 0.25,
            bluetooth_weight: 0.20,
            cellular_weight: 0.15,
        }
    }
}

/// Decides whether a reading plausibly places the subject inside a zone.
#[derive(Debug, Clone, Default)]
pub struct GeofenceValidator {
    config: GeofenceValidatorConfig,
}

impl GeofenceValidator {
    /// Create a validator with the given configuration.
    pub fn new(config: GeofenceValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a reading against a zone, corroborated by the scanner.
    ///
    /// Scanner failures on any channel are absorbed as confidence 0 for
    /// that channel; this method itself has no failure mode.
    pub fn validate(
        &self,
        zone: &GeofenceZone,
        reading: &LocationReading,
        scanner: &dyn SignalScanner,
    ) -> GeofenceValidation {
        let distance_m = zone.distance_from_center(&reading.point);
        let gps = self.score_gps(zone, distance_m);
        let wifi = self.score_channel(
            scanner,
            SignalChannel::Wifi,
            &zone.known_wifi,
            self.config.wifi_match_weight,
        );
        let bluetooth = self.score_channel(
            scanner,
            SignalChannel::Bluetooth,
            &zone.known_bluetooth,
            self.config.aux_match_weight,
        );
        let cellular = self.score_channel(
            scanner,
            SignalChannel::Cellular,
            &zone.known_cell,
            self.config.aux_match_weight,
        );

        let score = (self.config.gps_weight * gps.confidence.value() as f64
            + self.config.wifi_weight * wifi.confidence.value() as f64
            + self.config.bluetooth_weight * bluetooth.confidence.value() as f64
            + self.config.cellular_weight * cellular.confidence.value() as f64)
            .round() as u8;

        let mut risks = Vec::new();
        if distance_m > zone.radius_m {
            risks.push(format!(
                "GPS places the device {:.0} m from the zone center, outside the {:.0} m radius",
                distance_m, zone.radius_m
            ));
        }
        if reading.accuracy_m < self.config.fine_accuracy_m {
            risks.push(format!(
                "GPS accuracy of {:.1} m is suspiciously fine, often seen with emulated GPS",
                reading.accuracy_m
            ));
        }
        if wifi.matched.is_empty() {
            risks.push("no known Wi-Fi network observed".to_string());
        }
        if bluetooth.matched.is_empty() {
            risks.push("no known Bluetooth device observed".to_string());
        }
        if cellular.matched.is_empty() {
            risks.push("no known cellular tower observed".to_string());
        }
        if score < self.config.low_score_threshold {
            risks.push(format!(
                "overall confidence {} is below {}",
                score, self.config.low_score_threshold
            ));
        }

        let is_valid = score >= self.config.valid_threshold;
        debug!(
            zone = %zone.id,
            score,
            is_valid,
            risk_count = risks.len(),
            "geofence validation complete"
        );

        GeofenceValidation {
            gps,
            wifi,
            bluetooth,
            cellular,
            overall: OverallScore {
                score,
                is_valid,
                risks,
            },
        }
    }

    /// GPS sub-score: 100 inside the radius, then a linear decay of one
    /// confidence point per meter of overshoot.
    fn score_gps(&self, zone: &GeofenceZone, distance_m: f64) -> SignalScore {
        let confidence = if distance_m <= zone.radius_m {
            Confidence::full()
        } else {
            Confidence::new((100.0 - (distance_m - zone.radius_m)).round().max(0.0) as i64)
        };

        SignalScore {
            confidence,
            detail: format!("{:.1} m from zone center", distance_m),
            matched: Vec::new(),
        }
    }

    /// Auxiliary sub-score: `min(100, matches × per_match_weight)`.
    fn score_channel(
        &self,
        scanner: &dyn SignalScanner,
        channel: SignalChannel,
        known: &[String],
        per_match_weight: u32,
    ) -> SignalScore {
        let observed = match scanner.scan(channel) {
            Ok(observed) => observed,
            Err(err) => {
                warn!(%channel, error = %err, "signal scan failed, degrading to confidence 0");
                return SignalScore::unavailable();
            }
        };

        // Set semantics: an identifier observed more than once in a scan
        // still counts as a single match.
        let mut matched: Vec<String> = Vec::new();
        for id in observed {
            if known.iter().any(|k| *k == id) && !matched.contains(&id) {
                matched.push(id);
            }
        }

        let confidence = Confidence::new((matched.len() as u32 * per_match_weight).min(100) as i64);

        SignalScore {
            confidence,
            detail: format!("{} of {} known {} identifiers observed", matched.len(), known.len(), channel),
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;
    use crate::integration::StaticScanner;
    use chrono::Utc;

    fn test_zone() -> GeofenceZone {
        GeofenceZone::new(
            "zone-1",
            "Main Campus",
            GeoPoint::new(-6.914744, 107.609810),
            100.0,
        )
        .with_wifi(&["SCHOOL-WIFI", "SCHOOL-GUEST", "LAB-WIFI", "ADMIN-WIFI"])
        .with_bluetooth(&["beacon-01", "beacon-02", "beacon-03"])
        .with_cell(&["510-10-2791", "510-10-2792", "510-10-2793"])
    }

    fn all_signals_scanner() -> StaticScanner {
        StaticScanner::new()
            .with_channel(
                SignalChannel::Wifi,
                &["SCHOOL-WIFI", "SCHOOL-GUEST", "LAB-WIFI", "ADMIN-WIFI"],
            )
            .with_channel(
                SignalChannel::Bluetooth,
                &["beacon-01", "beacon-02", "beacon-03"],
            )
            .with_channel(
                SignalChannel::Cellular,
                &["510-10-2791", "510-10-2792", "510-10-2793"],
            )
    }

    fn reading_at(point: GeoPoint, accuracy_m: f64) -> LocationReading {
        LocationReading::new(point, accuracy_m, Utc::now())
    }

    #[test]
    fn test_reading_at_center_has_full_gps_confidence() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        let reading = reading_at(zone.center, 10.0);

        let result = validator.validate(&zone, &reading, &StaticScanner::new());
        assert_eq!(result.gps.confidence.value(), 100);
    }

    #[test]
    fn test_gps_confidence_decays_past_radius() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        // ~150 m north of center: 50 m overshoot on a 100 m radius.
        let reading = reading_at(GeoPoint::new(-6.913395, 107.609810), 10.0);

        let result = validator.validate(&zone, &reading, &StaticScanner::new());
        let confidence = result.gps.confidence.value();
        assert!(
            (49..=51).contains(&confidence),
            "50 m overshoot should give confidence ~50, got {}",
            confidence
        );
    }

    #[test]
    fn test_far_reading_has_zero_gps_confidence() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        // Several kilometers away.
        let reading = reading_at(GeoPoint::new(-6.960000, 107.609810), 10.0);

        let result = validator.validate(&zone, &reading, &StaticScanner::new());
        assert_eq!(result.gps.confidence.value(), 0);
    }

    #[test]
    fn test_all_channels_full_gives_overall_100() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        let reading = reading_at(zone.center, 10.0);

        let result = validator.validate(&zone, &reading, &all_signals_scanner());
        assert_eq!(result.wifi.confidence.value(), 100);
        assert_eq!(result.bluetooth.confidence.value(), 99);
        assert_eq!(result.cellular.confidence.value(), 99);
        // 0.40*100 + 0.25*100 + 0.20*99 + 0.15*99 = 99.65 → 100
        assert_eq!(result.overall.score, 100);
        assert!(result.overall.is_valid);
    }

    #[test]
    fn test_no_signals_gives_overall_zero_gps_only_weight() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        // Far away with nothing observed: every sub-score is 0.
        let reading = reading_at(GeoPoint::new(-6.960000, 107.609810), 10.0);

        let result = validator.validate(&zone, &reading, &StaticScanner::new());
        assert_eq!(result.overall.score, 0);
        assert!(!result.overall.is_valid);
    }

    #[test]
    fn test_risk_findings_in_insertion_order() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        // Outside the zone, implausibly fine accuracy, no signals at all.
        let reading = reading_at(GeoPoint::new(-6.913395, 107.609810), 2.0);

        let result = validator.validate(&zone, &reading, &StaticScanner::new());
        let risks = &result.overall.risks;
        assert_eq!(risks.len(), 6);
        assert!(risks[0].contains("outside"));
        assert!(risks[1].contains("suspiciously fine"));
        assert!(risks[2].contains("Wi-Fi"));
        assert!(risks[3].contains("Bluetooth"));
        assert!(risks[4].contains("cellular"));
        assert!(risks[5].contains("below"));
    }

    #[test]
    fn test_scanner_failure_degrades_gracefully() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        let reading = reading_at(zone.center, 10.0);
        let scanner = all_signals_scanner().with_failing(SignalChannel::Wifi);

        let result = validator.validate(&zone, &reading, &scanner);
        assert_eq!(result.wifi.confidence.value(), 0);
        assert!(result.wifi.matched.is_empty());
        // 0.40*100 + 0.25*0 + 0.20*99 + 0.15*99 = 74.65 → 75, still valid.
        assert_eq!(result.overall.score, 75);
        assert!(result.overall.is_valid);
    }

    #[test]
    fn test_repeated_observed_identifiers_count_once() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        let reading = reading_at(zone.center, 10.0);
        // A scan reporting the same two known networks twice each.
        let scanner = StaticScanner::new().with_channel(
            SignalChannel::Wifi,
            &["SCHOOL-WIFI", "SCHOOL-GUEST", "SCHOOL-WIFI", "SCHOOL-GUEST"],
        );

        let result = validator.validate(&zone, &reading, &scanner);
        assert_eq!(result.wifi.matched.len(), 2);
        assert_eq!(
            result.wifi.confidence.value(),
            50,
            "two distinct matches must score 50 however often they repeat"
        );
    }

    #[test]
    fn test_partial_wifi_matches() {
        let zone = test_zone();
        let validator = GeofenceValidator::default();
        let reading = reading_at(zone.center, 10.0);
        let scanner = StaticScanner::new()
            .with_channel(SignalChannel::Wifi, &["SCHOOL-WIFI", "NEIGHBOR-WIFI"]);

        let result = validator.validate(&zone, &reading, &scanner);
        assert_eq!(result.wifi.matched.len(), 1);
        assert_eq!(result.wifi.confidence.value(), 25);
    }
}
