//! Composite device fingerprint derivation.
//!
//! The fingerprint is a heuristic identifier for uniqueness counting by
//! the pattern analyzer. It is derived once per device session and reused
//! for every event in that session; it is not a secure credential and must
//! never be treated as authentication.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::domain::DeviceFingerprint;

/// Environment characteristics a device session exposes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeviceEnvironment {
    /// Rendering surface signature (canvas hash or equivalent)
    pub surface_signature: String,
    /// Locale identifier, e.g. `id-ID`
    pub locale: String,
    /// Screen width in pixels
    pub screen_width: u32,
    /// Screen height in pixels
    pub screen_height: u32,
    /// Reported hardware concurrency (logical cores)
    pub hardware_concurrency: u32,
    /// When the session captured these characteristics
    pub captured_at: DateTime<Utc>,
}

/// Derive an opaque fingerprint from the session's environment.
///
/// SHA-256 over the joined characteristics, hex encoded. Stable for equal
/// input; the session capture timestamp makes separate sessions distinct
/// even on identical hardware.
pub fn derive_fingerprint(env: &DeviceEnvironment) -> DeviceFingerprint {
    let mut hasher = Sha256::new();
    hasher.update(env.surface_signature.as_bytes());
    hasher.update(b"|");
    hasher.update(env.locale.as_bytes());
    hasher.update(b"|");
    hasher.update(format!("{}x{}", env.screen_width, env.screen_height).as_bytes());
    hasher.update(b"|");
    hasher.update(env.hardware_concurrency.to_le_bytes());
    hasher.update(b"|");
    hasher.update(env.captured_at.timestamp_millis().to_le_bytes());

    DeviceFingerprint::new(hex::encode(hasher.finalize()))
}
