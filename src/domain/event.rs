//! Attendance event entity and its identifiers.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use uuid::Uuid;

use super::coordinates::GeoPoint;

/// Identifier of the attendance subject (student or device session).
///
/// Supplied by the session/auth collaborator; the core never mints these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Wrap an externally supplied subject identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an attendance event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heuristic device identifier used for uniqueness counting.
///
/// Not a secure credential: a motivated adversary can forge it, so it must
/// never gate authentication. See [`crate::guard::fingerprint`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DeviceFingerprint(String);

impl DeviceFingerprint {
    /// Wrap a derived fingerprint digest.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Get the digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logical attendance event for a subject on a calendar date.
///
/// The (subject, date) uniqueness invariant is enforced by the storage
/// collaborator with an atomic insert-if-absent; the core does not
/// serialize concurrent attempts by the same subject.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AttendanceEvent {
    /// Event identifier
    pub id: EventId,
    /// Owning subject
    pub subject_id: SubjectId,
    /// Calendar date of the event (derived from check-in time)
    pub date: NaiveDate,
    /// Check-in timestamp
    pub check_in_at: DateTime<Utc>,
    /// Check-out timestamp, if the subject has checked out
    pub check_out_at: Option<DateTime<Utc>>,
    /// Location the event was accepted at
    pub location: GeoPoint,
    /// Fingerprint of the device that produced the event
    pub device_fingerprint: DeviceFingerprint,
    /// Structured validation outcome persisted alongside the event
    pub validation_metadata: serde_json::Value,
}

impl AttendanceEvent {
    /// Create a check-in event; the date is derived from the check-in time.
    pub fn new(
        subject_id: SubjectId,
        check_in_at: DateTime<Utc>,
        location: GeoPoint,
        device_fingerprint: DeviceFingerprint,
        validation_metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            subject_id,
            date: check_in_at.date_naive(),
            check_in_at,
            check_out_at: None,
            location,
            device_fingerprint,
            validation_metadata,
        }
    }

    /// Record the check-out time.
    pub fn check_out(&mut self, at: DateTime<Utc>) {
        self.check_out_at = Some(at);
    }

    /// Check-in time of day as minutes since midnight (UTC).
    pub fn check_in_minutes(&self) -> u32 {
        self.check_in_at.hour() * 60 + self.check_in_at.minute()
    }
}
