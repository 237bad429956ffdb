//! Time-step frequencies for derived axis ranges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TsPlotError};

/// Unit of a [`Frequency`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyUnit {
    /// One second.
    Second,
    /// One minute.
    Minute,
    /// One hour.
    Hour,
    /// One day.
    Day,
    /// One week.
    Week,
    /// One calendar month.
    Month,
}

impl FrequencyUnit {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "w",
            Self::Month => "mo",
        }
    }
}

/// The fixed step between consecutive points of a derived time axis.
///
/// Parsed from and displayed as compact strings such as `"30s"`, `"15min"`,
/// `"2h"`, `"1d"`, `"1w"` or `"3mo"`; a bare unit means a count of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Frequency {
    count: u32,
    unit: FrequencyUnit,
}

impl Frequency {
    /// Creates a frequency of `count` steps of `unit`.
    pub fn new(count: u32, unit: FrequencyUnit) -> Result<Self> {
        if count == 0 {
            return Err(TsPlotError::frequency("step count must be at least 1"));
        }
        Ok(Self { count, unit })
    }

    /// The default one-day frequency.
    pub const fn daily() -> Self {
        Self {
            count: 1,
            unit: FrequencyUnit::Day,
        }
    }

    /// The step count.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// The step unit.
    pub const fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Advances a timestamp by one step, or `None` on overflow.
    pub fn advance(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.unit {
            FrequencyUnit::Month => from.checked_add_months(Months::new(self.count)),
            _ => from.checked_add_signed(self.fixed_step()?),
        }
    }

    fn fixed_step(&self) -> Option<Duration> {
        let unit_seconds = match self.unit {
            FrequencyUnit::Second => 1,
            FrequencyUnit::Minute => 60,
            FrequencyUnit::Hour => 3_600,
            FrequencyUnit::Day => 86_400,
            FrequencyUnit::Week => 604_800,
            FrequencyUnit::Month => return None,
        };
        Some(Duration::seconds(i64::from(self.count) * unit_seconds))
    }

    /// Decomposes a fixed delta into the largest evenly dividing unit.
    ///
    /// Sub-second and non-positive deltas yield `None`.
    pub(crate) fn from_step(step: Duration) -> Option<Self> {
        let seconds = step.num_seconds();
        if seconds <= 0 || step != Duration::seconds(seconds) {
            return None;
        }
        let table = [
            (604_800, FrequencyUnit::Week),
            (86_400, FrequencyUnit::Day),
            (3_600, FrequencyUnit::Hour),
            (60, FrequencyUnit::Minute),
            (1, FrequencyUnit::Second),
        ];
        table
            .iter()
            .find(|(unit_seconds, _)| seconds % unit_seconds == 0)
            .and_then(|(unit_seconds, unit)| {
                let count = u32::try_from(seconds / unit_seconds).ok()?;
                Some(Self { count, unit: *unit })
            })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Frequency {
    type Err = TsPlotError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, suffix) = trimmed.split_at(split);
        let count: u32 = if digits.is_empty() {
            1
        } else {
            digits
                .parse()
                .map_err(|_| TsPlotError::frequency(format!("invalid step count in '{trimmed}'")))?
        };
        let unit = match suffix.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" => FrequencyUnit::Second,
            "min" | "mins" => FrequencyUnit::Minute,
            "h" | "hr" | "hrs" => FrequencyUnit::Hour,
            "d" | "day" | "days" => FrequencyUnit::Day,
            "w" | "wk" | "week" | "weeks" => FrequencyUnit::Week,
            "mo" | "month" | "months" => FrequencyUnit::Month,
            "m" => {
                return Err(TsPlotError::frequency(
                    "ambiguous unit 'm', use 'min' or 'mo'",
                ))
            }
            other => {
                return Err(TsPlotError::frequency(format!(
                    "unknown unit '{other}' in '{trimmed}'"
                )))
            }
        };
        Self::new(count, unit)
    }
}

impl TryFrom<String> for Frequency {
    type Error = TsPlotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.to_string()
    }
}

/// Tries to infer the time-series frequency from a sample of timestamps.
///
/// Returns `None` for samples shorter than two points or with irregular
/// spacing. Uniform calendar-month steps are recognized even though their
/// fixed deltas differ.
pub fn infer_frequency(timestamps: &[DateTime<Utc>]) -> Option<Frequency> {
    if timestamps.len() < 2 {
        return None;
    }
    let first_step = timestamps[1] - timestamps[0];
    if timestamps
        .windows(2)
        .all(|pair| pair[1] - pair[0] == first_step)
    {
        if let Some(frequency) = Frequency::from_step(first_step) {
            return Some(frequency);
        }
    }
    infer_monthly(timestamps)
}

fn infer_monthly(timestamps: &[DateTime<Utc>]) -> Option<Frequency> {
    let (first, second) = (timestamps[0], timestamps[1]);
    let months = (second.year() - first.year()) * 12 + second.month() as i32
        - first.month() as i32;
    if months <= 0 {
        return None;
    }
    let count = u32::try_from(months).ok()?;
    timestamps
        .windows(2)
        .all(|pair| pair[0].checked_add_months(Months::new(count)) == Some(pair[1]))
        .then_some(Frequency {
            count,
            unit: FrequencyUnit::Month,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for input in ["30s", "15min", "2h", "1d", "1w", "3mo"] {
            let frequency: Frequency = input.parse().unwrap();
            assert_eq!(frequency.to_string(), input);
        }
    }

    #[test]
    fn test_parse_bare_unit_defaults_to_one() {
        let frequency: Frequency = "d".parse().unwrap();
        assert_eq!(frequency.count(), 1);
        assert_eq!(frequency.unit(), FrequencyUnit::Day);
        assert_eq!("D".parse::<Frequency>().unwrap(), Frequency::daily());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "0d".parse::<Frequency>(),
            Err(TsPlotError::Frequency(_))
        ));
        assert!(matches!(
            "m".parse::<Frequency>(),
            Err(TsPlotError::Frequency(_))
        ));
        assert!(matches!(
            "5fortnights".parse::<Frequency>(),
            Err(TsPlotError::Frequency(_))
        ));
        assert!(matches!(
            "".parse::<Frequency>(),
            Err(TsPlotError::Frequency(_))
        ));
    }

    #[test]
    fn test_advance_fixed_units() {
        let start = ts(2024, 1, 1, 0);
        let hourly = Frequency::new(6, FrequencyUnit::Hour).unwrap();
        assert_eq!(hourly.advance(start), Some(ts(2024, 1, 1, 6)));

        let weekly = Frequency::new(1, FrequencyUnit::Week).unwrap();
        assert_eq!(weekly.advance(start), Some(ts(2024, 1, 8, 0)));
    }

    #[test]
    fn test_advance_months_follows_calendar() {
        let start = ts(2024, 1, 31, 0);
        let monthly = Frequency::new(1, FrequencyUnit::Month).unwrap();
        // 2024-02 has 29 days, so the day clamps
        assert_eq!(monthly.advance(start), Some(ts(2024, 2, 29, 0)));
    }

    #[test]
    fn test_infer_uniform_samples() {
        let daily: Vec<_> = (0..5).map(|i| ts(2024, 1, 1 + i, 0)).collect();
        assert_eq!(infer_frequency(&daily), Some(Frequency::daily()));

        let hourly: Vec<_> = (0..4).map(|i| ts(2024, 1, 1, i)).collect();
        assert_eq!(
            infer_frequency(&hourly),
            Some(Frequency::new(1, FrequencyUnit::Hour).unwrap())
        );
    }

    #[test]
    fn test_infer_monthly_samples() {
        let monthly = vec![ts(2024, 1, 1, 0), ts(2024, 2, 1, 0), ts(2024, 3, 1, 0)];
        assert_eq!(
            infer_frequency(&monthly),
            Some(Frequency::new(1, FrequencyUnit::Month).unwrap())
        );
    }

    #[test]
    fn test_infer_rejects_irregular_and_short_samples() {
        let irregular = vec![ts(2024, 1, 1, 0), ts(2024, 1, 2, 0), ts(2024, 1, 5, 0)];
        assert_eq!(infer_frequency(&irregular), None);
        assert_eq!(infer_frequency(&[ts(2024, 1, 1, 0)]), None);
        assert_eq!(infer_frequency(&[]), None);
    }

    #[test]
    fn test_serde_string_form() {
        let frequency: Frequency = serde_json::from_str("\"15min\"").unwrap();
        assert_eq!(frequency, Frequency::new(15, FrequencyUnit::Minute).unwrap());
        assert_eq!(serde_json::to_string(&frequency).unwrap(), "\"15min\"");
    }
}
