/// Library for turning human-readable date strings into Discord timestamp markup.
use {
    chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Timelike},
    thiserror::Error,
};

/// Enum representing errors that can occur while parsing a date.
#[derive(Debug, Error)]
pub enum ParseDateError {
    /// Error variant raised when the input matches none of the accepted formats.
    #[error(
        "Could not parse date string. Please use a format like 'YYYY-MM-DD HH:MM:SS', 'DD/MM/YYYY HH:MM', or just 'HH:MM' for today's date"
    )]
    UnrecognizedFormat,
}

/// How a pattern's match is completed into a full date and time.
enum DatePattern {
    /// Time of day only; combined with the reference date's calendar day.
    TimeOnly(&'static str),
    /// Complete date and time.
    DateTime(&'static str),
    /// Date only; the time defaults to midnight.
    DateOnly(&'static str),
}

/// Accepted input patterns, tried in order. The first full-input match wins,
/// so DD/MM/YYYY deliberately takes precedence over MM/DD/YYYY when both would
/// parse ("03/04/2023" is the 3rd of April). Callers depend on this order.
const PATTERNS: [DatePattern; 11] = [
    DatePattern::TimeOnly("%H:%M"),
    DatePattern::TimeOnly("%I:%M %p"),
    DatePattern::DateTime("%Y-%m-%d %H:%M:%S"),
    DatePattern::DateTime("%Y-%m-%d %H:%M"),
    DatePattern::DateOnly("%Y-%m-%d"),
    DatePattern::DateTime("%d/%m/%Y %H:%M:%S"),
    DatePattern::DateTime("%d/%m/%Y %H:%M"),
    DatePattern::DateOnly("%d/%m/%Y"),
    DatePattern::DateTime("%m/%d/%Y %H:%M:%S"),
    DatePattern::DateTime("%m/%d/%Y %H:%M"),
    DatePattern::DateOnly("%m/%d/%Y"),
];

/// Parse a string representing a date and return the corresponding `DateTime<Local>`.
///
/// The reference date is automatically assumed to be Local::now().
///
/// # Arguments
/// * `string` - The string to be parsed as a date.
///
/// # Returns
/// * `Result<DateTime<Local>, ParseDateError>` - A `DateTime<Local>` if parsing is successful,
///   or a `ParseDateError` if there was an issue.
pub fn from_string(string: &str) -> Result<DateTime<Local>, ParseDateError> {
    from_string_with_reference(string, Local::now())
}

/// Parse a string representing a date and return the corresponding `DateTime<Local>`.
///
/// You specify a reference date standing in for "now". Time-only inputs such as
/// "15:30" are combined with the reference date's calendar day, and an empty
/// string yields the reference instant itself (truncated to whole seconds).
/// Passing the reference explicitly keeps parsing deterministic and testable.
///
/// # Arguments
/// * `string` - The string to be parsed as a date.
/// * `reference_date` - The DateTime representing "now", supplying today's date
///   for time-only inputs.
///
/// # Returns
/// * `Result<DateTime<Local>, ParseDateError>` - A `DateTime<Local>` if parsing is successful,
///   or a `ParseDateError` if there was an issue.
pub fn from_string_with_reference(
    string: &str,
    reference_date: DateTime<Local>,
) -> Result<DateTime<Local>, ParseDateError> {
    if string.is_empty() {
        return Ok(truncate_to_seconds(reference_date));
    }

    for pattern in &PATTERNS {
        let naive = match pattern {
            DatePattern::TimeOnly(fmt) => NaiveTime::parse_from_str(string, fmt)
                .ok()
                .map(|time| reference_date.date_naive().and_time(time)),
            DatePattern::DateTime(fmt) => NaiveDateTime::parse_from_str(string, fmt).ok(),
            DatePattern::DateOnly(fmt) => NaiveDate::parse_from_str(string, fmt)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN)),
        };

        if let Some(resolved) = naive.and_then(resolve_local) {
            return Ok(resolved);
        }
    }

    Err(ParseDateError::UnrecognizedFormat)
}

/// Parse an optional date string, as collected from the command line.
///
/// # Arguments
/// * `input` - The raw argument, if one was given.
/// * `reference_date` - The DateTime representing "now".
///
/// # Returns
/// * `Result<DateTime<Local>, ParseDateError>` - The reference instant truncated
///   to whole seconds when `input` is absent, otherwise the parsed date.
pub fn from_input_with_reference(
    input: Option<&str>,
    reference_date: DateTime<Local>,
) -> Result<DateTime<Local>, ParseDateError> {
    match input {
        Some(string) => from_string_with_reference(string, reference_date),
        None => Ok(truncate_to_seconds(reference_date)),
    }
}

/// Resolve a naive wall-clock time in the local timezone. Ambiguous times
/// (clocks rolled back) take the earlier mapping; nonexistent times (clocks
/// rolled forward) resolve to nothing and the pattern is rejected.
fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(datetime) => Some(datetime),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

fn truncate_to_seconds(datetime: DateTime<Local>) -> DateTime<Local> {
    // with_nanosecond(0) only fails for out-of-range values, never for zero.
    datetime.with_nanosecond(0).unwrap_or(datetime)
}

/// Discord timestamp styles in display order: a label for humans and the
/// single-character style code used in the markup. The default style has an
/// empty code and produces markup without a code suffix.
pub const FORMATS: [(&str, &str); 8] = [
    ("Default", ""),
    ("Short Time", "t"),
    ("Long Time", "T"),
    ("Short Date", "d"),
    ("Long Date", "D"),
    ("Short Date/Time", "f"),
    ("Long Date/Time", "F"),
    ("Relative Time", "R"),
];

/// One rendered timestamp style: the markup to paste into Discord and a
/// preview of how the client would display it.
#[derive(Debug, Clone)]
pub struct RenderedFormat {
    pub label: &'static str,
    pub markup: String,
    pub preview: String,
}

/// Render every Discord timestamp style for a given instant.
///
/// # Arguments
/// * `timestamp` - The instant being formatted.
/// * `now` - The DateTime representing "now", used only by the relative style.
///
/// # Returns
/// * `Vec<RenderedFormat>` - One entry per style, in [`FORMATS`] order.
pub fn render_formats(timestamp: DateTime<Local>, now: DateTime<Local>) -> Vec<RenderedFormat> {
    FORMATS
        .iter()
        .map(|&(label, code)| RenderedFormat {
            label,
            markup: markup(timestamp.timestamp(), code),
            preview: preview(timestamp, now, code),
        })
        .collect()
}

/// Build the `<t:SECONDS>` / `<t:SECONDS:CODE>` markup string for one style.
pub fn markup(epoch_seconds: i64, code: &str) -> String {
    if code.is_empty() {
        format!("<t:{epoch_seconds}>")
    } else {
        format!("<t:{epoch_seconds}:{code}>")
    }
}

fn preview(timestamp: DateTime<Local>, now: DateTime<Local>, code: &str) -> String {
    match code {
        "t" => timestamp.format("%I:%M %p").to_string(),
        "T" => timestamp.format("%I:%M:%S %p").to_string(),
        "d" => timestamp.format("%m/%d/%Y").to_string(),
        "D" => timestamp.format("%B %d, %Y").to_string(),
        "F" => timestamp.format("%A, %B %d, %Y %I:%M %p").to_string(),
        "R" => relative(timestamp, now),
        // "f" and the default style render identically.
        _ => timestamp.format("%B %d, %Y %I:%M %p").to_string(),
    }
}

/// Describe `timestamp` relative to `now`. Same-day instants are reported in
/// minutes using the signed second difference; anything else is reported in
/// whole calendar days, so 23:59 yesterday is "yesterday" even two minutes ago.
fn relative(timestamp: DateTime<Local>, now: DateTime<Local>) -> String {
    let days = timestamp
        .date_naive()
        .signed_duration_since(now.date_naive())
        .num_days();

    if days == 0 {
        let seconds = timestamp.signed_duration_since(now).num_seconds();
        let minutes = seconds.abs() / 60;
        if seconds.abs() < 60 {
            "just now".to_string()
        } else if seconds < 0 && minutes == 1 {
            "1 minute ago".to_string()
        } else if seconds < 0 {
            format!("{minutes} minutes ago")
        } else if minutes == 1 {
            "in 1 minute".to_string()
        } else {
            format!("in {minutes} minutes")
        }
    } else if days == -1 {
        "yesterday".to_string()
    } else if days < 0 {
        format!("{} days ago", -days)
    } else if days == 1 {
        "tomorrow".to_string()
    } else {
        format!("in {days} days")
    }
}

//==============================================================================
// Tests
//==============================================================================
