//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// format_date(&date, "LL")         // -> "January 15, 2024"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date in ISO 8601 form for `<time>` and `article:published_time`
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Localized long date, en-US flavour
    if format == "LL" {
        return "%B %-d, %Y".to_string();
    }

    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
        ("SSS", "%3f"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
