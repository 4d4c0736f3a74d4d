//! Benchmarks for the check-in validation hot path.
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use presensi_integrity::prelude::*;

// ============================================================
// Fixtures
// ============================================================

fn campus_zone() -> GeofenceZone {
    GeofenceZone::new(
        "campus",
        "Main Campus",
        GeoPoint::new(-6.914744, 107.609810),
        100.0,
    )
    .with_wifi(&["SCHOOL-WIFI", "SCHOOL-GUEST", "LAB-WIFI", "ADMIN-WIFI"])
    .with_bluetooth(&["beacon-01", "beacon-02", "beacon-03"])
    .with_cell(&["510-10-2791", "510-10-2792", "510-10-2793"])
}

fn on_site_scanner() -> StaticScanner {
    StaticScanner::new()
        .with_channel(
            SignalChannel::Wifi,
            &["SCHOOL-WIFI", "SCHOOL-GUEST", "LAB-WIFI", "ADMIN-WIFI"],
        )
        .with_channel(
            SignalChannel::Bluetooth,
            &["beacon-01", "beacon-02", "beacon-03"],
        )
        .with_channel(
            SignalChannel::Cellular,
            &["510-10-2791", "510-10-2792", "510-10-2793"],
        )
}

/// Deterministic month of attendance events for one subject.
fn month_of_events(days: u32) -> Vec<AttendanceEvent> {
    (1..=days)
        .map(|day| {
            let at = Utc
                .with_ymd_and_hms(2025, 3, day, 7, 5 + (day % 10), 0)
                .unwrap();
            AttendanceEvent::new(
                SubjectId::new("student-7"),
                at,
                GeoPoint::new(-6.914744 + day as f64 * 1e-5, 107.609810),
                DeviceFingerprint::new("device-a"),
                serde_json::Value::Null,
            )
        })
        .collect()
}

// ============================================================
// Benchmarks
// ============================================================

fn bench_geofence_validate(c: &mut Criterion) {
    let zone = campus_zone();
    let scanner = on_site_scanner();
    let validator = GeofenceValidator::default();
    let reading = LocationReading::new(GeoPoint::new(-6.914800, 107.609750), 8.0, Utc::now());

    c.bench_function("geofence_validate_on_site", |b| {
        b.iter(|| validator.validate(black_box(&zone), black_box(&reading), &scanner))
    });
}

fn bench_spoofing_assess(c: &mut Criterion) {
    let detector = SpoofingDetector::default();
    let start = Utc::now();
    let mut history = LocationHistory::new();
    for i in 0..10i64 {
        history.push(LocationReading::new(
            GeoPoint::new(-6.914744 + i as f64 * 1e-5, 107.609810),
            8.0,
            start + Duration::seconds(i * 60),
        ));
    }
    let reading = LocationReading::new(
        GeoPoint::new(-6.914744, 107.609810),
        8.0,
        start + Duration::seconds(11 * 60),
    );

    c.bench_function("spoofing_assess_full_history", |b| {
        b.iter(|| detector.assess(black_box(&reading), black_box(&history)))
    });
}

fn bench_pattern_analyze(c: &mut Criterion) {
    let analyzer = PatternAnalyzer::default();
    let mut group = c.benchmark_group("pattern_analyze");

    for days in [7u32, 14, 30] {
        let history = month_of_events(days.min(28));
        group.throughput(Throughput::Elements(history.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &history, |b, history| {
            b.iter(|| analyzer.analyze(black_box(history), days))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_geofence_validate,
    bench_spoofing_assess,
    bench_pattern_analyze
);
criterion_main!(benches);
