//! # presensi-integrity
//!
//! Self-service attendance integrity engine: decides whether to accept a
//! check-in/check-out event from a claimed device location, and
//! retrospectively scores a student's attendance history for signs of
//! location spoofing or proxy attendance ("titip presensi").
//!
//! ## Architecture
//!
//! Three cooperating components behind one orchestrating engine:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    presensi-integrity                    │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────────────┐   ┌────────────┐   │
//! │  │ Spoofing │   │     Geofence      │   │  Pattern   │   │
//! │  │  Guard   │──▶│     Validator     │   │  Analyzer  │   │
//! │  └──────────┘   └───────────────────┘   └────────────┘   │
//! │        └──────────────────┴──────────────────┘           │
//! │                 ┌─────────▼─────────┐                    │
//! │                 │  Integration      │                    │
//! │                 │  (ports/adapters) │                    │
//! │                 └───────────────────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A check-in attempt flows guard-first: the rate limiter and spoofing
//! detector evaluate the reading against recent history; if not rejected,
//! the geofence validator combines GPS with auxiliary signal scans into a
//! weighted confidence score. The pattern analyzer runs independently on
//! demand over committed history and never gates individual check-ins.
//!
//! ## Example
//!
//! ```rust
//! use presensi_integrity::prelude::*;
//!
//! let zone = GeofenceZone::new(
//!     "campus",
//!     "Main Campus",
//!     GeoPoint::new(-6.914744, 107.609810),
//!     100.0,
//! )
//! .with_wifi(&["SCHOOL-WIFI"]);
//!
//! let engine = IntegrityEngine::new(
//!     IntegrityConfig::builder(zone).build(),
//!     Box::new(StaticScanner::new()),
//!     Box::new(MemoryEventStore::new()),
//! );
//!
//! let subject = SubjectId::new("student-7");
//! let reading = LocationReading::new(
//!     GeoPoint::new(-6.914744, 107.609810),
//!     8.0,
//!     chrono::Utc::now(),
//! );
//! let validation = engine.validate_check_in(&subject, &reading).unwrap();
//! println!("accepted: {}", validation.accepted);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod domain;
mod engine;
pub mod geofence;
pub mod guard;
pub mod integration;
pub mod pattern;

pub use engine::{CheckInValidation, IntegrityEngine};

// Re-export main types
pub use domain::{
    analysis::{
        BehaviorPattern, DevicePattern, LocationPattern, OverallRisk, PatternAnalysis,
        RiskLevel, TimePattern,
    },
    coordinates::{haversine_distance_m, GeoPoint, EARTH_RADIUS_M},
    event::{AttendanceEvent, DeviceFingerprint, EventId, SubjectId},
    reading::LocationReading,
    validation::{Confidence, GeofenceValidation, OverallScore, SignalChannel, SignalScore},
    zone::GeofenceZone,
};

pub use geofence::{GeofenceValidator, GeofenceValidatorConfig};

pub use guard::{
    derive_fingerprint, DeviceEnvironment, LocationHistory, RateDecision, RateLimitReason,
    RateLimiter, RateLimiterConfig, RateLimiterState, SpoofingAssessment, SpoofingConfig,
    SpoofingDetector, SpoofingGuard,
};

pub use integration::{
    EventStore, IdentityError, IdentityProvider, LocationSensor, MemoryEventStore, ScanError,
    SensorError, SignalScanner, StaticScanner, StoreError,
};

pub use pattern::{AnalyzerConfig, PatternAnalyzer};

use chrono::NaiveDate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unified error type for integrity operations.
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    /// The device sensor could not supply a usable reading. Surfaced
    /// immediately; never retried automatically.
    #[error("location unavailable: {0}")]
    LocationUnavailable(#[from] SensorError),

    /// The attempt was rate limited; terminal for this attempt.
    #[error("rate limited: {reason}")]
    RateLimited {
        /// Which limit tripped
        reason: RateLimitReason,
    },

    /// The geofence or spoofing stage rejected the reading.
    #[error("validation failed with score {score}")]
    ValidationFailed {
        /// Overall geofence score
        score: u8,
        /// Itemized findings for display
        risks: Vec<String>,
    },

    /// The subject already has an event for the date; a conflict, not an
    /// internal error.
    #[error("duplicate event for {subject} on {date}")]
    DuplicateEvent {
        /// Subject that already checked in
        subject: SubjectId,
        /// Conflicting date
        date: NaiveDate,
    },

    /// The session identity could not be resolved.
    #[error("identity unavailable: {0}")]
    Identity(#[from] IdentityError),

    /// Storage backend failure; retryable by the caller.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for IntegrityError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { subject, date } => {
                IntegrityError::DuplicateEvent { subject, date }
            }
            StoreError::Backend(detail) => IntegrityError::Storage(detail),
        }
    }
}

/// Engine configuration: the zone, component thresholds, and sensor bounds.
#[derive(Debug, Clone)]
pub struct IntegrityConfig {
    /// The registered zone check-ins are validated against
    pub zone: GeofenceZone,
    /// Geofence validator thresholds and weights
    pub validator: GeofenceValidatorConfig,
    /// Spoofing detector thresholds
    pub spoofing: SpoofingConfig,
    /// Rate limiter thresholds
    pub limiter: RateLimiterConfig,
    /// Pattern analyzer thresholds
    pub analyzer: AnalyzerConfig,
    /// Reference points for the spoofing proximity denylist
    pub reference_points: Vec<GeoPoint>,
    /// How long to wait for the location sensor, in milliseconds
    pub sensor_timeout_ms: u64,
    /// Oldest acceptable cached reading, in milliseconds
    pub sensor_max_staleness_ms: u64,
}

impl IntegrityConfig {
    /// Start building a configuration for a zone.
    pub fn builder(zone: GeofenceZone) -> IntegrityConfigBuilder {
        IntegrityConfigBuilder {
            config: IntegrityConfig {
                zone,
                validator: GeofenceValidatorConfig::default(),
                spoofing: SpoofingConfig::default(),
                limiter: RateLimiterConfig::default(),
                analyzer: AnalyzerConfig::default(),
                reference_points: Vec::new(),
                sensor_timeout_ms: 10_000,
                sensor_max_staleness_ms: 60_000,
            },
        }
    }
}

/// Builder for [`IntegrityConfig`].
#[derive(Debug)]
pub struct IntegrityConfigBuilder {
    config: IntegrityConfig,
}

impl IntegrityConfigBuilder {
    /// Override the geofence validator configuration.
    pub fn validator(mut self, validator: GeofenceValidatorConfig) -> Self {
        self.config.validator = validator;
        self
    }

    /// Override the spoofing detector configuration.
    pub fn spoofing(mut self, spoofing: SpoofingConfig) -> Self {
        self.config.spoofing = spoofing;
        self
    }

    /// Override the rate limiter configuration.
    pub fn limiter(mut self, limiter: RateLimiterConfig) -> Self {
        self.config.limiter = limiter;
        self
    }

    /// Override the pattern analyzer configuration.
    pub fn analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.config.analyzer = analyzer;
        self
    }

    /// Register reference points for the spoofing proximity denylist.
    pub fn reference_points(mut self, points: Vec<GeoPoint>) -> Self {
        self.config.reference_points = points;
        self
    }

    /// Set the sensor timeout in milliseconds.
    pub fn sensor_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.sensor_timeout_ms = timeout_ms;
        self
    }

    /// Set the sensor staleness bound in milliseconds.
    pub fn sensor_max_staleness_ms(mut self, max_staleness_ms: u64) -> Self {
        self.config.sensor_max_staleness_ms = max_staleness_ms;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> IntegrityConfig {
        self.config
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        // Engine
        CheckInValidation, IntegrityConfig, IntegrityEngine, IntegrityError,
        // Domain types
        AttendanceEvent, Confidence, DeviceFingerprint, GeoPoint, GeofenceValidation,
        GeofenceZone, LocationReading, PatternAnalysis, RiskLevel, SignalChannel, SubjectId,
        // Guard
        DeviceEnvironment, LocationHistory, RateLimitReason, SpoofingDetector,
        // Ports
        EventStore, IdentityProvider, LocationSensor, MemoryEventStore, SignalScanner,
        StaticScanner,
        // Components
        GeofenceValidator, PatternAnalyzer,
    };
}
