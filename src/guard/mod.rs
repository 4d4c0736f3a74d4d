//! Spoofing guard: plausibility scoring and rate limiting over keyed
//! per-subject state.
//!
//! State is keyed by [`SubjectId`] so concurrent attempts by different
//! subjects never interleave on shared mutable data. Concurrent attempts
//! by the same subject are not serialized here; the storage collaborator's
//! (subject, date) constraint is the final arbiter.

pub mod fingerprint;
pub mod history;
pub mod rate_limit;
pub mod spoofing;

pub use fingerprint::{derive_fingerprint, DeviceEnvironment};
pub use history::LocationHistory;
pub use rate_limit::{
    RateDecision, RateLimitReason, RateLimiter, RateLimiterConfig, RateLimiterState,
};
pub use spoofing::{SpoofingAssessment, SpoofingConfig, SpoofingDetector};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::domain::{LocationReading, SubjectId};

/// Per-subject guard state: location history plus limiter counters.
#[derive(Debug, Default)]
struct SubjectState {
    history: LocationHistory,
    limiter: RateLimiterState,
}

/// Stateful guard combining the spoofing detector and the rate limiter.
#[derive(Debug, Default)]
pub struct SpoofingGuard {
    detector: SpoofingDetector,
    limiter: RateLimiter,
    subjects: Mutex<HashMap<SubjectId, SubjectState>>,
}

impl SpoofingGuard {
    /// Create a guard from its two components.
    pub fn new(detector: SpoofingDetector, limiter: RateLimiter) -> Self {
        Self {
            detector,
            limiter,
            subjects: Mutex::new(HashMap::new()),
        }
    }

    /// Run the rate limiter for one attempt by `subject` at `now`.
    pub fn check_rate(&self, subject: &SubjectId, now: DateTime<Utc>) -> RateDecision {
        let mut subjects = self.subjects.lock();
        let state = subjects.entry(subject.clone()).or_default();
        self.limiter.check(&mut state.limiter, now)
    }

    /// Assess a reading for spoofing signatures and record it.
    ///
    /// The reading is appended to the subject's history on every call,
    /// whether or not the assessment passes.
    pub fn assess_reading(
        &self,
        subject: &SubjectId,
        reading: &LocationReading,
    ) -> SpoofingAssessment {
        let mut subjects = self.subjects.lock();
        let state = subjects.entry(subject.clone()).or_default();
        let assessment = self.detector.assess(reading, &state.history);
        state.history.push(reading.clone());
        assessment
    }

    /// Number of readings currently retained for a subject.
    pub fn history_len(&self, subject: &SubjectId) -> usize {
        self.subjects
            .lock()
            .get(subject)
            .map(|s| s.history.len())
            .unwrap_or(0)
    }
}
