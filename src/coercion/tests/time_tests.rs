//! Timestamp parser tests

use crate::coercion::time::{parse_by_serial, parse_by_text};
use crate::models::Timestamp;
use chrono_tz::Tz;

/// RFC3339 rendering pins both the instant and the offset
fn rfc3339(ts: Option<Timestamp>) -> Option<String> {
    ts.map(|t| t.to_rfc3339())
}

#[test]
fn test_serial_epoch_convention() {
    assert_eq!(
        rfc3339(parse_by_serial(36526.0, Tz::UTC)),
        Some("2000-01-01T00:00:00+00:00".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_serial(0.0, Tz::UTC)),
        Some("1899-12-30T00:00:00+00:00".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_serial(-1.0, Tz::UTC)),
        Some("1899-12-29T00:00:00+00:00".to_string())
    );
}

#[test]
fn test_serial_fraction_is_time_of_day() {
    assert_eq!(
        rfc3339(parse_by_serial(36526.75, Tz::UTC)),
        Some("2000-01-01T18:00:00+00:00".to_string())
    );
}

#[test]
fn test_serial_relabels_wall_clock_in_zone() {
    // Same wall-clock fields as UTC, different instant
    assert_eq!(
        rfc3339(parse_by_serial(36526.5, Tz::Asia__Tokyo)),
        Some("2000-01-01T12:00:00+09:00".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_serial(36526.0, Tz::America__New_York)),
        Some("2000-01-01T00:00:00-05:00".to_string())
    );
}

#[test]
fn test_serial_dates_past_2192() {
    assert_eq!(
        rfc3339(parse_by_serial(109574.0, Tz::UTC)),
        Some("2199-12-31T00:00:00+00:00".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_serial(109575.5, Tz::Asia__Tokyo)),
        Some("2200-01-01T12:00:00+09:00".to_string())
    );
}

#[test]
fn test_serial_out_of_range() {
    assert_eq!(parse_by_serial(f64::NAN, Tz::UTC), None);
    assert_eq!(parse_by_serial(f64::INFINITY, Tz::UTC), None);
    assert_eq!(parse_by_serial(1e10, Tz::UTC), None);
}

#[test]
fn test_text_without_offset_uses_fallback_zone() {
    assert_eq!(
        rfc3339(parse_by_text("2000/01/02 3:04:05", Tz::Asia__Tokyo)),
        Some("2000-01-02T03:04:05+09:00".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_text("2000-01-02T03:04:05", Tz::Asia__Tokyo)),
        Some("2000-01-02T03:04:05+09:00".to_string())
    );
}

#[test]
fn test_text_with_utc_designator_ignores_fallback() {
    assert_eq!(
        rfc3339(parse_by_text("2000/01/02 3:04:05Z", Tz::Asia__Tokyo)),
        Some("2000-01-02T03:04:05+00:00".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_text("2000-01-02T03:04:05Z", Tz::Asia__Tokyo)),
        Some("2000-01-02T03:04:05+00:00".to_string())
    );
}

#[test]
fn test_text_with_explicit_offset() {
    assert_eq!(
        rfc3339(parse_by_text("2000-01-02 03:04:05+05:30", Tz::Asia__Tokyo)),
        Some("2000-01-02T03:04:05+05:30".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_text("2000/01/02T03:04:05-08:00", Tz::UTC)),
        Some("2000-01-02T03:04:05-08:00".to_string())
    );
}

#[test]
fn test_text_fractional_seconds() {
    assert_eq!(
        rfc3339(parse_by_text("2000-01-02 03:04:05.25", Tz::UTC)),
        Some("2000-01-02T03:04:05.250+00:00".to_string())
    );
}

#[test]
fn test_bare_date_is_local_midnight() {
    assert_eq!(
        rfc3339(parse_by_text("2000/01/02", Tz::Asia__Tokyo)),
        Some("2000-01-02T00:00:00+09:00".to_string())
    );
    assert_eq!(
        rfc3339(parse_by_text("2000-01-02", Tz::UTC)),
        Some("2000-01-02T00:00:00+00:00".to_string())
    );
}

#[test]
fn test_unparseable_text() {
    for text in ["", "hello", "01/02/2000", "2000-13-01", "2000-01-02 25:00:00", "36526"] {
        assert_eq!(parse_by_text(text, Tz::UTC), None, "{:?} should not parse", text);
    }
}

#[test]
fn test_wall_clock_in_dst_gap_moves_forward() {
    assert_eq!(
        rfc3339(parse_by_text("2021-03-14 02:30:00", Tz::America__New_York)),
        Some("2021-03-14T03:30:00-04:00".to_string())
    );
}

#[test]
fn test_ambiguous_wall_clock_takes_earlier_instant() {
    assert_eq!(
        rfc3339(parse_by_text("2021-11-07 01:30:00", Tz::America__New_York)),
        Some("2021-11-07T01:30:00-04:00".to_string())
    );
}
