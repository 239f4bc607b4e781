use lineup_core::{format_date, format_duration};

#[test]
fn duration_zero_is_zero_seconds() {
    assert_eq!(format_duration(0), "0s");
}

#[test]
fn duration_under_a_minute_shows_seconds_only() {
    assert_eq!(format_duration(59), "59s");
}

#[test]
fn duration_includes_lower_units_once_minutes_appear() {
    assert_eq!(format_duration(65), "1m 5s");
    assert_eq!(format_duration(60), "1m 0s");
}

#[test]
fn duration_includes_all_units_once_hours_appear() {
    assert_eq!(format_duration(3661), "1h 1m 1s");
    assert_eq!(format_duration(3600), "1h 0m 0s");
    assert_eq!(format_duration(7325), "2h 2m 5s");
}

#[test]
fn date_renders_in_day_month_year_order() {
    assert_eq!(format_date("2024-03-09T18:05:00"), "09/03/2024 18:05");
    assert_eq!(format_date("2024-03-09 18:05:00.123456"), "09/03/2024 18:05");
}

#[test]
fn date_accepts_rfc3339_offsets() {
    assert_eq!(format_date("2024-03-09T18:05:00-03:00"), "09/03/2024 18:05");
}

#[test]
fn unparseable_date_is_echoed_back() {
    assert_eq!(format_date("not a date"), "not a date");
    assert_eq!(format_date(""), "");
}
