pub mod kpi;
pub mod machine;
pub mod monitor;
pub mod report;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Current unix timestamp in seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// One formatter for every user-visible timestamp (tables, detail pages,
/// spreadsheet exports), so the textual representation stays consistent
/// across surfaces.
pub fn format_timestamp(unix: i64) -> String {
    match Utc.timestamp_opt(unix, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "N/A".to_string(),
    }
}

/// `YYYY-MM` bucket key for monthly summaries. Lexical order of these keys
/// is chronological order.
pub fn year_month(unix: i64) -> Option<String> {
    Utc.timestamp_opt(unix, 0)
        .single()
        .map(|dt: DateTime<Utc>| dt.format("%Y-%m").to_string())
}

/// Parse an HTML `datetime-local` input value ("2024-05-01T08:30"),
/// interpreted as UTC.
pub fn parse_datetime_local(value: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}

/// Render a unix timestamp back into a `datetime-local` input value.
pub fn to_datetime_local(unix: i64) -> String {
    match Utc.timestamp_opt(unix, 0).single() {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M").to_string(),
        None => String::new(),
    }
}
