//! Identity and validation primitives shared by every record shape.
//!
//! # Invariants
//! - `RecordId` values are positive and assigned only by a store.
//! - Persisted deadlines stay within years `1..=9999` so their `YYYY-MM-DD`
//!   form sorts the same way the dates do.

use chrono::{Datelike, Days, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned record identity.
pub type RecordId = i64;

/// Smallest year a persisted deadline may carry.
pub const MIN_DEADLINE_YEAR: i32 = 1;
/// Largest year a persisted deadline may carry.
pub const MAX_DEADLINE_YEAR: i32 = 9999;
/// Days between 0001-01-01 and 9999-12-31.
pub const MAX_DAYS_TO_ADD: i64 = 3_652_058;

/// Write-side validation failure for record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Deadline cannot be persisted in canonical `YYYY-MM-DD` form.
    DeadlineOutOfRange(NaiveDate),
    /// Template offset exceeds the representable deadline span.
    DaysToAddOutOfRange(i64),
    /// `today + days` does not produce a valid calendar date.
    DeadlineOverflow { today: NaiveDate, days: i64 },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeadlineOutOfRange(date) => write!(
                f,
                "deadline {date} must fall within years {MIN_DEADLINE_YEAR}..={MAX_DEADLINE_YEAR}"
            ),
            Self::DaysToAddOutOfRange(days) => write!(
                f,
                "days_to_add ({days}) must be within -{MAX_DAYS_TO_ADD}..={MAX_DAYS_TO_ADD}"
            ),
            Self::DeadlineOverflow { today, days } => {
                write!(f, "{today} shifted by {days} days is not a valid date")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// Checks that a deadline has a canonical persisted form.
pub fn validate_deadline(date: NaiveDate) -> Result<(), RecordValidationError> {
    if (MIN_DEADLINE_YEAR..=MAX_DEADLINE_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(RecordValidationError::DeadlineOutOfRange(date))
    }
}

/// Returns `today` shifted by a signed number of calendar days.
pub fn shift_date(today: NaiveDate, days: i64) -> Result<NaiveDate, RecordValidationError> {
    let shifted = if days >= 0 {
        today.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or(RecordValidationError::DeadlineOverflow { today, days })
}

/// Whole calendar days from `today` to `date` (negative when `date` is past).
pub fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

#[cfg(test)]
mod tests {
    use super::{days_between, shift_date, validate_deadline, RecordValidationError};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn shift_date_crosses_month_and_year_boundaries() {
        assert_eq!(shift_date(date(2026, 12, 30), 3).unwrap(), date(2027, 1, 2));
        assert_eq!(shift_date(date(2026, 3, 1), -1).unwrap(), date(2026, 2, 28));
        assert_eq!(shift_date(date(2026, 3, 1), 0).unwrap(), date(2026, 3, 1));
    }

    #[test]
    fn shift_date_reports_overflow_instead_of_panicking() {
        let today = date(2026, 1, 1);
        let err = shift_date(today, i64::MAX).unwrap_err();
        assert_eq!(
            err,
            RecordValidationError::DeadlineOverflow {
                today,
                days: i64::MAX
            }
        );
    }

    #[test]
    fn validate_deadline_rejects_five_digit_years() {
        assert!(validate_deadline(date(9999, 12, 31)).is_ok());
        assert!(validate_deadline(date(10000, 1, 1)).is_err());
        assert!(validate_deadline(date(0, 12, 31)).is_err());
    }

    #[test]
    fn days_between_is_whole_calendar_days() {
        let today = date(2026, 10, 16);
        assert_eq!(days_between(today, date(2026, 10, 23)), 7);
        assert_eq!(days_between(today, date(2026, 10, 15)), -1);
        assert_eq!(days_between(today, today), 0);
    }
}
