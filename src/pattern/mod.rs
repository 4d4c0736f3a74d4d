//! Longitudinal behavioral pattern analysis.
//!
//! Consumes a bounded window of committed [`crate::domain::AttendanceEvent`]s
//! for one subject and scores four independent anomaly signals plus an
//! aggregate risk. It never gates individual check-ins.

pub mod analyzer;
pub mod clustering;
pub mod stats;

pub use analyzer::{AnalyzerConfig, PatternAnalyzer};
pub use clustering::{cluster_points, Cluster};
