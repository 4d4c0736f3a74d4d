//! Orchestrating engine tying the guard, validator, and analyzer together.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    AttendanceEvent, DeviceFingerprint, GeofenceValidation, LocationReading, PatternAnalysis,
    SubjectId,
};
use crate::geofence::GeofenceValidator;
use crate::guard::{
    derive_fingerprint, DeviceEnvironment, RateDecision, RateLimiter, SpoofingDetector,
    SpoofingGuard,
};
use crate::integration::{
    EventStore, IdentityProvider, LocationSensor, SensorError, SignalScanner,
};
use crate::pattern::PatternAnalyzer;
use crate::{IntegrityConfig, IntegrityError};

/// Outcome of one check-in validation.
#[derive(Debug, Clone)]
pub struct CheckInValidation {
    /// Whether both the guard and the geofence accepted the reading
    pub accepted: bool,
    /// Itemized geofence result
    pub geofence: GeofenceValidation,
    /// Guard findings (spoofing flags, failed confidence), empty on a
    /// clean pass
    pub guard_reasons: Vec<String>,
}

/// The attendance integrity engine.
///
/// Constructed with injected configuration and ports; holds no global
/// state. Per-subject guard state lives in a keyed map inside the guard.
pub struct IntegrityEngine {
    config: IntegrityConfig,
    validator: GeofenceValidator,
    guard: SpoofingGuard,
    analyzer: PatternAnalyzer,
    scanner: Box<dyn SignalScanner>,
    store: Box<dyn EventStore>,
}

impl IntegrityEngine {
    /// Build an engine from configuration and its two required ports.
    pub fn new(
        config: IntegrityConfig,
        scanner: Box<dyn SignalScanner>,
        store: Box<dyn EventStore>,
    ) -> Self {
        let validator = GeofenceValidator::new(config.validator.clone());
        let detector = SpoofingDetector::new(config.spoofing.clone())
            .with_reference_points(config.reference_points.clone());
        let guard = SpoofingGuard::new(detector, RateLimiter::new(config.limiter.clone()));
        let analyzer = PatternAnalyzer::new(config.analyzer.clone());

        Self {
            config,
            validator,
            guard,
            analyzer,
            scanner,
            store,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &IntegrityConfig {
        &self.config
    }

    /// Validate a check-in attempt at the current instant.
    pub fn validate_check_in(
        &self,
        subject: &SubjectId,
        reading: &LocationReading,
    ) -> Result<CheckInValidation, IntegrityError> {
        self.validate_check_in_at(subject, reading, Utc::now())
    }

    /// Validate a check-in attempt at an explicit instant.
    ///
    /// Stage order: rate limit, then spoofing plausibility, then geofence.
    /// A rate-limited attempt is terminal and returns
    /// [`IntegrityError::RateLimited`]; spoofing and geofence rejections
    /// return `accepted = false` with itemized reasons so the caller can
    /// render them.
    pub fn validate_check_in_at(
        &self,
        subject: &SubjectId,
        reading: &LocationReading,
        now: DateTime<Utc>,
    ) -> Result<CheckInValidation, IntegrityError> {
        if !reading.point.is_finite() {
            return Err(IntegrityError::LocationUnavailable(
                SensorError::InvalidReading {
                    detail: "non-finite coordinates".to_string(),
                },
            ));
        }

        if let RateDecision::Rejected(reason) = self.guard.check_rate(subject, now) {
            warn!(%subject, %reason, "check-in attempt rate limited");
            return Err(IntegrityError::RateLimited { reason });
        }

        let assessment = self.guard.assess_reading(subject, reading);
        let mut guard_reasons = assessment.flags.clone();
        if !assessment.is_valid {
            guard_reasons.push(format!(
                "spoofing confidence {} is below the acceptance threshold",
                assessment.confidence
            ));
        }

        let geofence = self
            .validator
            .validate(&self.config.zone, reading, self.scanner.as_ref());

        let accepted = assessment.is_valid && geofence.overall.is_valid;
        info!(
            %subject,
            accepted,
            guard_confidence = assessment.confidence.value(),
            geofence_score = geofence.overall.score,
            "check-in validation complete"
        );

        Ok(CheckInValidation {
            accepted,
            geofence,
            guard_reasons,
        })
    }

    /// Persist an accepted check-in as an attendance event.
    ///
    /// The storage port's (subject, date) constraint is the final arbiter
    /// against duplicate same-day events; a conflict surfaces as
    /// [`IntegrityError::DuplicateEvent`].
    pub fn record_event(
        &self,
        subject: &SubjectId,
        reading: &LocationReading,
        fingerprint: DeviceFingerprint,
        validation_metadata: serde_json::Value,
    ) -> Result<AttendanceEvent, IntegrityError> {
        let event = AttendanceEvent::new(
            subject.clone(),
            reading.captured_at,
            reading.point,
            fingerprint,
            validation_metadata,
        );

        self.store.save_event(&event)?;
        info!(%subject, event = %event.id, date = %event.date, "attendance event recorded");
        Ok(event)
    }

    /// Analyze a subject's attendance pattern over a trailing window.
    ///
    /// `window_days` defaults to the configured analyzer window. Read-only;
    /// safe to run concurrently with live check-ins.
    pub fn analyze_pattern(
        &self,
        subject: &SubjectId,
        window_days: Option<u32>,
    ) -> Result<PatternAnalysis, IntegrityError> {
        self.analyze_pattern_at(subject, window_days, Utc::now())
    }

    /// Analyze a pattern window ending at an explicit instant.
    pub fn analyze_pattern_at(
        &self,
        subject: &SubjectId,
        window_days: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<PatternAnalysis, IntegrityError> {
        let window = window_days.unwrap_or_else(|| self.analyzer.window_days());
        // Inclusive of today: a window of N days spans exactly N calendar
        // dates, so a full window yields an attendance rate of 100%.
        let since = now.date_naive() - chrono::Duration::days(window.saturating_sub(1) as i64);
        let history = self.store.load_history(subject, since)?;
        Ok(self.analyzer.analyze(&history, window))
    }

    /// Full check-in flow: resolve identity, acquire a sensor reading,
    /// validate, derive the device fingerprint, and record the event.
    ///
    /// A geofence or spoofing rejection surfaces as
    /// [`IntegrityError::ValidationFailed`] with the combined reasons.
    pub fn check_in(
        &self,
        identity: &dyn IdentityProvider,
        sensor: &dyn LocationSensor,
        env: &DeviceEnvironment,
    ) -> Result<AttendanceEvent, IntegrityError> {
        let subject = identity.current_subject()?;
        let reading = sensor.current_reading(
            self.config.sensor_timeout_ms,
            self.config.sensor_max_staleness_ms,
        )?;

        let validation = self.validate_check_in(&subject, &reading)?;
        if !validation.accepted {
            let mut risks = validation.guard_reasons;
            risks.extend(validation.geofence.overall.risks);
            return Err(IntegrityError::ValidationFailed {
                score: validation.geofence.overall.score,
                risks,
            });
        }

        let metadata = serde_json::json!({
            "geofence_score": validation.geofence.overall.score,
            "geofence_risks": validation.geofence.overall.risks,
            "guard_reasons": validation.guard_reasons,
        });

        let fingerprint = derive_fingerprint(env);
        self.record_event(&subject, &reading, fingerprint, metadata)
    }
}
