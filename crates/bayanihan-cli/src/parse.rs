//! Typed parsing of console input.
//!
//! Every parser returns a [`ParseError`] instead of panicking, so menus can
//! report the problem and carry on.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Input that could not be turned into the requested value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not a date in any accepted format.
    #[error("invalid date '{0}', use YYYY-MM-DD")]
    Date(String),

    /// Not a whole number.
    #[error("'{0}' is not a whole number")]
    Number(String),

    /// A menu number outside the listed range.
    #[error("choose a number from 1 to {max}")]
    OutOfRange {
        /// Highest valid choice.
        max: usize,
    },
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a date with optional time. A bare date means midnight.
pub fn parse_date(input: &str) -> Result<NaiveDateTime, ParseError> {
    let input = input.trim();
    let with_time = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok());
    let date_only = || {
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    };
    with_time
        .or_else(date_only)
        .ok_or_else(|| ParseError::Date(input.to_string()))
}

/// Parse a signed whole number. Range checks belong to validation.
pub fn parse_capacity(input: &str) -> Result<i64, ParseError> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| ParseError::Number(input.to_string()))
}

/// Parse a 1-based menu choice into a 0-based index below `len`.
pub fn parse_choice(input: &str, len: usize) -> Result<usize, ParseError> {
    let input = input.trim();
    let n: usize = input
        .parse()
        .map_err(|_| ParseError::Number(input.to_string()))?;
    if (1..=len).contains(&n) {
        Ok(n - 1)
    } else {
        Err(ParseError::OutOfRange { max: len })
    }
}

/// `y` or `Y` confirms; anything else declines.
pub fn is_confirmed(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
