//! Derived date-range generation.

use chrono::{DateTime, Utc};

use crate::error::{Result, TsPlotError};
use crate::frequency::Frequency;

/// Generates `periods` evenly spaced timestamps starting at `start`.
///
/// The range is left-inclusive: the first point is `start` itself and no
/// point past `start + (periods - 1) * frequency` is produced.
pub fn date_range(
    start: DateTime<Utc>,
    periods: usize,
    frequency: &Frequency,
) -> Result<Vec<DateTime<Utc>>> {
    let mut values = Vec::with_capacity(periods);
    let mut current = start;
    for index in 0..periods {
        values.push(current);
        if index + 1 < periods {
            current = frequency.advance(current).ok_or_else(|| {
                TsPlotError::input(format!("date range overflows past {current}"))
            })?;
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyUnit;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_range_length_matches_periods() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let range = date_range(start, 10, &Frequency::daily()).unwrap();
        assert_eq!(range.len(), 10);
        assert_eq!(range[0], start);
        assert_eq!(range[9] - range[0], Duration::days(9));
    }

    #[test]
    fn test_range_is_evenly_spaced() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let frequency = Frequency::new(15, FrequencyUnit::Minute).unwrap();
        let range = date_range(start, 8, &frequency).unwrap();
        for pair in range.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(15));
        }
    }

    #[test]
    fn test_empty_and_single_ranges() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(date_range(start, 0, &Frequency::daily()).unwrap().is_empty());
        assert_eq!(
            date_range(start, 1, &Frequency::daily()).unwrap(),
            vec![start]
        );
    }

    #[test]
    fn test_monthly_range_follows_calendar() {
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let monthly = Frequency::new(1, FrequencyUnit::Month).unwrap();
        let range = date_range(start, 3, &monthly).unwrap();
        assert_eq!(range[1], Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(range[2], Utc.with_ymd_and_hms(2024, 3, 29, 0, 0, 0).unwrap());
    }
}
