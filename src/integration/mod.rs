//! Ports for external collaborators.
//!
//! The core consumes four capabilities from the surrounding application:
//! the device location sensor, the auxiliary signal scanners, the event
//! store, and the session identity provider. Each is a trait so production
//! deployments can supply native-agent-backed implementations while tests
//! supply deterministic fakes. There is no built-in random simulator.

mod memory_store;
mod scanner;

pub use memory_store::MemoryEventStore;
pub use scanner::StaticScanner;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    AttendanceEvent, LocationReading, SignalChannel, SubjectId,
};

/// Failure modes of the device location sensor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The sensor did not produce a reading within the timeout.
    #[error("location sensor timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// The user or platform denied location access.
    #[error("location permission denied")]
    PermissionDenied,

    /// The only available reading exceeds the staleness bound.
    #[error("cached reading is {age_ms} ms old (limit {max_staleness_ms} ms)")]
    StaleReading {
        /// Age of the cached reading
        age_ms: u64,
        /// Staleness bound that was exceeded
        max_staleness_ms: u64,
    },

    /// The sensor produced a malformed reading (non-finite coordinates).
    #[error("invalid reading: {detail}")]
    InvalidReading {
        /// What was wrong with the reading
        detail: String,
    },
}

/// Failure of an auxiliary signal scan.
///
/// Absorbed locally by the geofence validator as confidence 0 for the
/// channel; never propagated as a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{channel} channel unavailable: {detail}")]
pub struct ScanError {
    /// Channel that failed
    pub channel: SignalChannel,
    /// Why the scan failed
    pub detail: String,
}

/// Failure modes of the event store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The (subject, date) uniqueness constraint rejected the write.
    #[error("event already exists for {subject} on {date}")]
    Duplicate {
        /// Subject that already has an event
        subject: SubjectId,
        /// Date the conflict occurred on
        date: NaiveDate,
    },

    /// Backend failure; retryable by the caller.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failure of the session identity lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No authenticated session is active.
    #[error("no active session")]
    NoSession,
}

/// Device location sensor port.
pub trait LocationSensor: Send + Sync {
    /// Acquire the current location, waiting at most `timeout_ms` and
    /// rejecting cached readings older than `max_staleness_ms`.
    fn current_reading(
        &self,
        timeout_ms: u64,
        max_staleness_ms: u64,
    ) -> Result<LocationReading, SensorError>;
}

/// Auxiliary signal scanner port (Wi-Fi, Bluetooth, cellular).
pub trait SignalScanner: Send + Sync {
    /// Scan one channel and return the observed identifiers.
    fn scan(&self, channel: SignalChannel) -> Result<Vec<String>, ScanError>;
}

/// Attendance event storage port.
///
/// `save_event` must be atomic per (subject, date): two concurrent
/// validations can both pass independently, so at-most-one-event-per-day
/// is enforced here with an insert-if-absent, not in the decision logic.
pub trait EventStore: Send + Sync {
    /// Load all events for a subject on or after `since`, oldest first.
    fn load_history(
        &self,
        subject: &SubjectId,
        since: NaiveDate,
    ) -> Result<Vec<AttendanceEvent>, StoreError>;

    /// Persist an event, failing with [`StoreError::Duplicate`] when the
    /// subject already has an event for the date.
    fn save_event(&self, event: &AttendanceEvent) -> Result<(), StoreError>;
}

/// Session identity port.
pub trait IdentityProvider: Send + Sync {
    /// Resolve the subject of the current session.
    fn current_subject(&self) -> Result<SubjectId, IdentityError>;
}
