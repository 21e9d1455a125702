use chrono::NaiveDate;

use crate::constants::FIXING_DATE_FORMAT;
use crate::errors::ValidationError;

/// Parse a fixing date entered as `DD/MM/YYYY`. Surrounding whitespace is
/// ignored.
pub fn parse_fixing_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), FIXING_DATE_FORMAT).map_err(ValidationError::from)
}

/// Split a newline-separated block of dates into trimmed, non-blank lines.
pub fn split_date_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
