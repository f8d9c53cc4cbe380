// Human-readable age of a notification.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

/// Describe how long ago `timestamp` was, as seen at `now`.
///
/// Under an hour: `"N mins ago"`. Under a day: `"N hours ago"`. Older items
/// are bucketed by calendar day in `now`'s time zone: `"Today"`,
/// `"Yesterday"`, or the short date (`M/D/YYYY`). Timestamps in the future
/// read as `"0 mins ago"`. Evaluated on every call, never cached.
pub fn relative_time<Tz>(now: &DateTime<Tz>, timestamp: &DateTime<Utc>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let minutes = now
        .clone()
        .signed_duration_since(timestamp.with_timezone(&now.timezone()))
        .num_minutes()
        .max(0);

    if minutes < 60 {
        return format!("{minutes} mins ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hours ago");
    }

    let local = timestamp.with_timezone(&now.timezone());
    let days = (now.date_naive() - local.date_naive()).num_days();
    match days {
        0 => "Today".into(),
        1 => "Yesterday".into(),
        _ => local.format("%-m/%-d/%Y").to_string(),
    }
}
