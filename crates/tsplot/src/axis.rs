//! Axis formatting helpers, primarily for the temporal x-axis.

use chrono::{DateTime, Duration, Utc};

/// Maximum number of x tick labels on a subplot.
pub const MAX_X_TICKS: usize = 20;

/// Maximum number of y tick labels on a subplot.
pub const MAX_Y_TICKS: usize = 10;

/// Default grid line color.
pub const GRID_COLOR: &str = "#b2b2b2";

/// Chooses an x tick label format suited to the plotted time span.
pub fn x_label_format(span: Duration) -> &'static str {
    if span < Duration::minutes(1) {
        "%H:%M:%S"
    } else if span < Duration::hours(1) {
        "%d %H:%M"
    } else if span < Duration::days(1) {
        "%m-%d %H:%M"
    } else {
        "%Y-%m-%d"
    }
}

/// Formats a y tick label, abbreviating large magnitudes.
pub fn format_y_label(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1000.0 {
        format!("{:.0}k", value / 1000.0)
    } else if value.abs() < 10.0 && value.fract() != 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.0}")
    }
}

/// Resolved tick formatting for one figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisFormat {
    /// strftime-style format for x tick labels.
    pub x_format: String,
    /// Number of x tick labels to request.
    pub x_labels: usize,
    /// Number of y tick labels to request.
    pub y_labels: usize,
}

impl AxisFormat {
    /// Builds the tick formatting for a derived range, honoring a custom
    /// x label format when one is supplied.
    pub fn for_range(range: &[DateTime<Utc>], custom_format: Option<&str>) -> Self {
        let span = match (range.first(), range.last()) {
            (Some(first), Some(last)) => *last - *first,
            _ => Duration::zero(),
        };
        let x_format = custom_format.map_or_else(
            || x_label_format(span).to_string(),
            std::string::ToString::to_string,
        );
        Self {
            x_format,
            x_labels: range.len().clamp(2, MAX_X_TICKS),
            y_labels: MAX_Y_TICKS,
        }
    }
}
