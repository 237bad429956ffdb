//! Test utilities and shared fixtures for the tsplot crate.
//!
//! Provides logging setup, timestamp helpers and synthetic series
//! generators for unit and integration testing.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    use std::sync::Once;
    use tracing_subscriber::{fmt, EnvFilter};

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available.
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Synthetic sample data for figure and range testing.
pub mod series_fixtures {
    use super::*;

    /// Evenly spaced daily timestamps.
    pub fn daily_timestamps(start: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        (0..count)
            .map(|i| start + Duration::days(i as i64))
            .collect()
    }

    /// Evenly spaced minute timestamps with the given step.
    pub fn minute_timestamps(
        start: DateTime<Utc>,
        count: usize,
        step_minutes: i64,
    ) -> Vec<DateTime<Utc>> {
        (0..count)
            .map(|i| start + Duration::minutes(i as i64 * step_minutes))
            .collect()
    }

    /// Deterministic wavy series for plotting tests.
    pub fn wavy_series(count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| (i as f64 * 1.5) + (i as f64).sin() * 10.0)
            .collect()
    }

    /// Linear trend with uniform noise of the given amplitude.
    #[cfg(any(test, feature = "fastrand"))]
    pub fn linear_series(count: usize, slope: f64, intercept: f64, noise_level: f64) -> Vec<f64> {
        (0..count)
            .map(|i| {
                let trend = slope * i as f64 + intercept;
                trend + (fastrand::f64() - 0.5) * 2.0 * noise_level
            })
            .collect()
    }
}
