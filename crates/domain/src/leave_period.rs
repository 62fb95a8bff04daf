// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar rules for leave periods.

use crate::error::DomainError;
use crate::types::DateRange;
use time::Date;

/// Validates a requested leave period against the current date.
///
/// The start date is checked before the ordering of the two dates, so a
/// request that is both in the past and inverted reports the past start.
///
/// # Errors
///
/// - `DomainError::StartDateInPast` if `start` precedes `today`
/// - `DomainError::EndBeforeStart` if `end` precedes `start`
pub fn validate_leave_period(start: Date, end: Date, today: Date) -> Result<DateRange, DomainError> {
    if start < today {
        return Err(DomainError::StartDateInPast { start, today });
    }

    if end < start {
        return Err(DomainError::EndBeforeStart { start, end });
    }

    Ok(DateRange::new(start, end))
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(
        value,
        time::macros::format_description!("[year]-[month]-[day]"),
    )
    .map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the date cannot be rendered,
/// which only happens for years outside `0..=9999`.
pub fn format_iso_date(date: Date) -> Result<String, DomainError> {
    date.format(time::macros::format_description!("[year]-[month]-[day]"))
        .map_err(|e| DomainError::DateParseError {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}
