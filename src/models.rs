//! Display Helpers
//!
//! Formatting of service timestamps for the task views.

use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// `createdAt` as `DD.MM.YYYY HH:MM` in local time
///
/// Accepts RFC 3339 or the service's `YYYY-MM-DD HH:MM:SS`; anything else is
/// shown as received.
pub fn format_created_at(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Today's date for the page header
pub fn today_label() -> String {
    Local::now().format("%-d. %-m. %Y").to_string()
}
