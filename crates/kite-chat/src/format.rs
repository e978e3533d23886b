//! Display formatting for agent result fields

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// `Jun 11, 2024, 12:00 PM`
const DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Format a date string for display in local time.
///
/// Absent input gives an empty string; input that does not parse is returned
/// unchanged.
pub fn format_date(input: Option<&str>) -> String {
    format_date_in(input, &Local)
}

/// Format a date string for display in the given time zone
pub fn format_date_in<Tz>(input: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(raw) = input else {
        return String::new();
    };
    match parse_date(raw) {
        Some(date) => date.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Badge color family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Emerald,
    Blue,
    Amber,
    Red,
    Purple,
    /// Neutral accent for anything unrecognized
    Primary,
}

impl Accent {
    /// Stable style token
    pub fn token(self) -> &'static str {
        match self {
            Accent::Emerald => "emerald",
            Accent::Blue => "blue",
            Accent::Amber => "amber",
            Accent::Red => "red",
            Accent::Purple => "purple",
            Accent::Primary => "primary",
        }
    }
}

/// Accent for a result item's `type`
pub fn item_type_accent(kind: Option<&str>) -> Accent {
    match kind.map(str::to_lowercase).as_deref() {
        Some("database") => Accent::Emerald,
        Some("page") => Accent::Blue,
        Some("search") => Accent::Amber,
        _ => Accent::Primary,
    }
}

/// Accent for a result's `action_type`
pub fn action_accent(action: Option<&str>) -> Accent {
    match action.map(str::to_lowercase).as_deref() {
        Some("create") => Accent::Emerald,
        Some("search") => Accent::Amber,
        Some("update") => Accent::Blue,
        Some("delete") => Accent::Red,
        Some("general") => Accent::Purple,
        _ => Accent::Primary,
    }
}
