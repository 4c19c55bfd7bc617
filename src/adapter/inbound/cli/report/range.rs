//! Time window calculation for snapshot comparison.

use chrono::{DateTime, Duration, Utc};

use crate::error::{ConfigError, Result};

/// A fetch-time window for snapshot queries.
#[derive(Debug, Clone)]
pub struct TimeWindow {
    /// Start instant (inclusive).
    pub start: DateTime<Utc>,
    /// End instant (inclusive).
    pub end: DateTime<Utc>,
    /// Human-readable label for the window.
    pub label: String,
}

impl TimeWindow {
    /// The last `days` days ending at `now`.
    ///
    /// # Errors
    /// Returns an error if the window start falls outside the calendar
    /// range.
    pub fn last_days_from(now: DateTime<Utc>, days: u32) -> Result<Self> {
        let start = Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "days",
                reason: format!("{days} days reaches before the earliest supported date"),
            })?;

        Ok(Self {
            start,
            end: now,
            label: format!("Last {days} days"),
        })
    }

    /// The last `days` days ending now.
    pub fn last_days(days: u32) -> Result<Self> {
        Self::last_days_from(Utc::now(), days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_spans_requested_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let window = TimeWindow::last_days_from(now, 30).unwrap();

        assert_eq!(window.end, now);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap());
        assert_eq!(window.label, "Last 30 days");
    }

    #[test]
    fn test_zero_days_is_an_instant() {
        let window = TimeWindow::last_days(0).unwrap();
        assert_eq!(window.start, window.end);
    }

    #[test]
    fn test_window_ends_now() {
        let before = Utc::now();
        let window = TimeWindow::last_days(7).unwrap();
        assert!(window.end >= before);
        assert!(window.start < window.end);
    }

    #[test]
    fn test_oversized_window_is_a_config_error() {
        let err = TimeWindow::last_days(u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::InvalidValue { field: "days", .. })
        ));
    }
}
