//! Domain module containing core entities and value objects.
//!
//! - **Entities**: objects with identity ([`AttendanceEvent`], [`GeofenceZone`])
//! - **Value objects**: immutable data without identity ([`LocationReading`],
//!   [`GeoPoint`], [`GeofenceValidation`], [`PatternAnalysis`])

pub mod analysis;
pub mod coordinates;
pub mod event;
pub mod reading;
pub mod validation;
pub mod zone;

// Re-export all domain types
pub use analysis::*;
pub use coordinates::*;
pub use event::*;
pub use reading::*;
pub use validation::*;
pub use zone::*;
