use chrono::{NaiveDate, Utc};
use thiserror::Error;

/// Stay-date validation failures. The messages are part of the API contract;
/// the frontend surfaces them verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid check-in date format")]
    InvalidCheckInFormat,

    #[error("Invalid check-out date format")]
    InvalidCheckOutFormat,

    #[error("Check-in date cannot be in the past")]
    CheckInInPast,

    #[error("Check-out date must be at least one day after check-in date")]
    StayTooShort,
}

const CALENDAR_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a plain calendar day. A `NaiveDate`
/// carries no time-of-day and no timezone, so "2024-12-26" means the same
/// day no matter where the server runs. Anything that is not a valid
/// calendar date in this format is rejected; there is no fallback parser.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), CALENDAR_FORMAT).ok()
}

/// Today as a UTC calendar day. Derived from the current instant's UTC
/// year/month/day so "today" comparisons ignore the server-local timezone.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// A validated half-open stay interval: the guest occupies the room on
/// `[check_in, check_out)` nights, so checkout day N and a new check-in on
/// day N can share the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayDates {
    /// Parse and validate a requested stay against `today`: both dates must
    /// be well-formed, check-in must not be in the past (today is allowed),
    /// and the stay must cover at least one night.
    pub fn parse(check_in: &str, check_out: &str, today: NaiveDate) -> Result<Self, DateError> {
        let check_in =
            parse_calendar_date(check_in).ok_or(DateError::InvalidCheckInFormat)?;
        let check_out =
            parse_calendar_date(check_out).ok_or(DateError::InvalidCheckOutFormat)?;

        if check_in < today {
            return Err(DateError::CheckInInPast);
        }
        if check_in >= check_out {
            return Err(DateError::StayTooShort);
        }

        Ok(StayDates { check_in, check_out })
    }
}
