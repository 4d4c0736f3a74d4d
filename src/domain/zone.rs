//! Registered geofence zone configuration.

use super::coordinates::GeoPoint;

/// A registered geographic zone with its known-good auxiliary signal sets.
///
/// Injected configuration, never global state: the validator receives the
/// zone on each call, so one engine can serve multiple sites.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GeofenceZone {
    /// Stable zone identifier
    pub id: String,
    /// Human-readable zone name
    pub name: String,
    /// Published zone center
    pub center: GeoPoint,
    /// Acceptance radius around the center, in meters
    pub radius_m: f64,
    /// Wi-Fi network identifiers expected inside the zone
    pub known_wifi: Vec<String>,
    /// Bluetooth device identifiers expected inside the zone
    pub known_bluetooth: Vec<String>,
    /// Cellular tower identifiers expected inside the zone
    pub known_cell: Vec<String>,
}

impl GeofenceZone {
    /// Create a zone with no registered auxiliary identifiers.
    pub fn new(id: &str, name: &str, center: GeoPoint, radius_m: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            center,
            radius_m,
            known_wifi: Vec::new(),
            known_bluetooth: Vec::new(),
            known_cell: Vec::new(),
        }
    }

    /// Set the known Wi-Fi networks for the zone.
    pub fn with_wifi(mut self, networks: &[&str]) -> Self {
        self.known_wifi = networks.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the known Bluetooth devices for the zone.
    pub fn with_bluetooth(mut self, devices: &[&str]) -> Self {
        self.known_bluetooth = devices.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the known cellular towers for the zone.
    pub fn with_cell(mut self, towers: &[&str]) -> Self {
        self.known_cell = towers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Distance from the zone center in meters.
    pub fn distance_from_center(&self, point: &GeoPoint) -> f64 {
        self.center.distance_to(point)
    }

    /// Whether a point lies within the acceptance radius.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.distance_from_center(point) <= self.radius_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_zone() -> GeofenceZone {
        GeofenceZone::new(
            "zone-1",
            "SMKN 1 Main Campus",
            GeoPoint::new(-6.914744, 107.609810),
            100.0,
        )
    }

    #[test]
    fn test_center_is_contained() {
        let zone = test_zone();
        assert!(zone.contains(&zone.center));
        assert_eq!(zone.distance_from_center(&zone.center), 0.0);
    }

    #[test]
    fn test_point_outside_radius() {
        let zone = test_zone();
        // ~150 m north of center.
        let outside = GeoPoint::new(-6.913395, 107.609810);
        assert!(!zone.contains(&outside));
        let d = zone.distance_from_center(&outside);
        assert!((d - 150.0).abs() < 2.0, "Expected ~150 m, got {}", d);
    }

    #[test]
    fn test_known_signal_builders() {
        let zone = test_zone()
            .with_wifi(&["SCHOOL-WIFI", "SCHOOL-GUEST"])
            .with_bluetooth(&["beacon-01"])
            .with_cell(&["510-10-2791"]);

        assert_eq!(zone.known_wifi.len(), 2);
        assert_eq!(zone.known_bluetooth.len(), 1);
        assert_eq!(zone.known_cell.len(), 1);
    }
}
