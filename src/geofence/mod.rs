//! Multi-signal geofence validation.
//!
//! GPS is the primary signal; Wi-Fi, Bluetooth, and cellular scans
//! corroborate it. A missing auxiliary signal degrades that channel to
//! confidence 0 rather than failing the whole validation.

mod validator;

pub use validator::{GeofenceValidator, GeofenceValidatorConfig};
