//! Timestamp resolution from display text or serial day numbers.

use crate::constants::{
    DEFAULT_TIME_ZONE, LOCAL_DATE_FORMATS, LOCAL_TIMESTAMP_FORMATS, MAX_SERIAL_DAYS, NANOS_PER_DAY,
    OFFSET_TIMESTAMP_FORMATS, serial_epoch,
};
use crate::error::{ExportError, Result};
use crate::models::Timestamp;
use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use std::borrow::Cow;

/// Resolve the spreadsheet's time zone identifier, defaulting to UTC
pub fn resolve_time_zone(name: Option<&str>) -> Result<Tz> {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_TIME_ZONE,
    };
    name.parse::<Tz>().map_err(|_| ExportError::UnknownTimeZone {
        name: name.to_string(),
    })
}

/// Parse a display string as a point in time.
///
/// Layouts with an explicit offset are tried first and keep that offset;
/// zone-less date-times and bare dates are then read as wall-clock time in
/// `fallback`. Returns `None` when no layout matches.
pub fn parse_by_text(text: &str, fallback: Tz) -> Option<Timestamp> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let with_offset = normalize_utc_designator(text);
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&with_offset, format) {
            return Some(parsed);
        }
    }

    for format in LOCAL_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(localize(naive, fallback));
        }
    }

    for format in LOCAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|midnight| localize(midnight, fallback));
        }
    }

    None
}

/// Interpret a serial day number (days since 1899-12-30, fraction = time of day).
///
/// The wall-clock fields are computed in UTC and then relabelled in
/// `fallback` without shifting them, so 36526.5 is noon local time.
/// Returns `None` only for non-finite serials or ones beyond the calendar range.
pub fn parse_by_serial(serial: f64, fallback: Tz) -> Option<Timestamp> {
    if !serial.is_finite() || serial.abs() >= MAX_SERIAL_DAYS {
        return None;
    }

    // Whole days and the time of day are added separately so the nanosecond
    // count never has to cover the full date
    let days = Duration::try_days(serial.trunc() as i64)?;
    let time_of_day = Duration::nanoseconds((serial.fract() * NANOS_PER_DAY).round() as i64);

    let epoch = NaiveDate::from_ymd_opt(serial_epoch::YEAR, serial_epoch::MONTH, serial_epoch::DAY)?
        .and_hms_opt(0, 0, 0)?;
    let wall_clock = epoch
        .checked_add_signed(days)?
        .checked_add_signed(time_of_day)?;

    Some(localize(wall_clock, fallback))
}

/// Attach `zone` to a wall-clock time.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times
/// inside a gap (clocks going forward) are read with the offset in force
/// before the transition, which lands them after the gap.
fn localize(naive: NaiveDateTime, zone: Tz) -> Timestamp {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(resolved) => resolved.fixed_offset(),
        LocalResult::Ambiguous(earliest, _) => earliest.fixed_offset(),
        LocalResult::None => {
            let before = zone
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix();
            zone.from_utc_datetime(&(naive - before)).fixed_offset()
        }
    }
}

/// chrono's `%:z` does not accept a bare `Z`
fn normalize_utc_designator(text: &str) -> Cow<'_, str> {
    match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(stripped) => Cow::Owned(format!("{}+00:00", stripped)),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_utc_designator() {
        assert_eq!(
            normalize_utc_designator("2000-01-02T03:04:05Z"),
            "2000-01-02T03:04:05+00:00"
        );
        assert_eq!(
            normalize_utc_designator("2000-01-02T03:04:05+09:00"),
            "2000-01-02T03:04:05+09:00"
        );
    }

    #[test]
    fn test_resolve_time_zone() {
        assert_eq!(resolve_time_zone(Some("Asia/Tokyo")).unwrap(), Tz::Asia__Tokyo);
        assert_eq!(resolve_time_zone(None).unwrap(), Tz::UTC);
        assert_eq!(resolve_time_zone(Some("")).unwrap(), Tz::UTC);
        assert!(matches!(
            resolve_time_zone(Some("Mars/Olympus_Mons")),
            Err(ExportError::UnknownTimeZone { .. })
        ));
    }
}
