//! In-memory event store with the (subject, date) uniqueness invariant.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::domain::{AttendanceEvent, SubjectId};

use super::{EventStore, StoreError};

/// Reference [`EventStore`] backed by a mutex-guarded map.
///
/// The whole insert-if-absent runs under one lock acquisition, which gives
/// the atomic conditional write the port contract requires: of two
/// concurrent saves for the same (subject, date), exactly one succeeds.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: Mutex<HashMap<(SubjectId, NaiveDate), AttendanceEvent>>,
}

impl MemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Fetch one event by subject and date.
    pub fn get(&self, subject: &SubjectId, date: NaiveDate) -> Option<AttendanceEvent> {
        self.events.lock().get(&(subject.clone(), date)).cloned()
    }
}

impl EventStore for MemoryEventStore {
    fn load_history(
        &self,
        subject: &SubjectId,
        since: NaiveDate,
    ) -> Result<Vec<AttendanceEvent>, StoreError> {
        let events = self.events.lock();
        let mut history: Vec<AttendanceEvent> = events
            .values()
            .filter(|e| &e.subject_id == subject && e.date >= since)
            .cloned()
            .collect();
        history.sort_by_key(|e| e.check_in_at);
        Ok(history)
    }

    fn save_event(&self, event: &AttendanceEvent) -> Result<(), StoreError> {
        let mut events = self.events.lock();
        let key = (event.subject_id.clone(), event.date);
        if events.contains_key(&key) {
            return Err(StoreError::Duplicate {
                subject: event.subject_id.clone(),
                date: event.date,
            });
        }
        events.insert(key, event.clone());
        Ok(())
    }
}
