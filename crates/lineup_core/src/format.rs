use chrono::{DateTime, NaiveDateTime};

/// Renders an ISO-8601 timestamp in the `dd/mm/yyyy hh:mm` convention used
/// across the rendered pages. Input that does not parse is echoed back
/// unchanged; a garbled timestamp is a display blemish, never an error.
pub fn format_date(input: &str) -> String {
    parse_timestamp(input)
        .map(|stamp| stamp.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| input.to_string())
}

fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.naive_local());
    }
    // The server emits naive timestamps with and without a `T` separator.
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// Renders a duration as `Xh Ym Zs`, starting at the highest non-zero unit
/// and always including every unit below it. Zero renders as `0s`.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
