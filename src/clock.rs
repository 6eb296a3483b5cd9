//! Display refresh
//!
//! Formats wall-clock time with the configured strftime template. The
//! template may span several lines (exam mode adds a header and banners).

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{Display, Write};
use thiserror::Error;

/// Bare time pattern, restored whenever exam mode is disabled
pub const DEFAULT_TEMPLATE: &str = "%H:%M:%S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid time template: {0:?}")]
    InvalidTemplate(String),
}

/// Reject templates containing unknown or dangling `%` specifiers
pub fn validate_template(template: &str) -> Result<(), FormatError> {
    if StrftimeItems::new(template).any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::InvalidTemplate(template.to_string()));
    }
    Ok(())
}

/// Format `now` with `template`
pub fn format_time<Tz>(template: &str, now: &DateTime<Tz>) -> Result<String, FormatError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    validate_template(template)?;

    let mut text = String::new();
    write!(text, "{}", now.format(template))
        .map_err(|_| FormatError::InvalidTemplate(template.to_string()))?;
    Ok(text)
}

/// Format the current local time
pub fn local_now(template: &str) -> Result<String, FormatError> {
    format_time(template, &Local::now())
}
