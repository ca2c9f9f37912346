//! Resolution of raw cells into typed values.
//!
//! [`coerce_cell`] is the pure decision procedure; [`Coercer`] binds it to a
//! time zone and a diagnostic sink so the assembler can call it per field.

use super::diagnostics::{CoercionFailure, DiagnosticSink, FailureReason};
use super::time::{parse_by_serial, parse_by_text};
use crate::models::{
    CellShape, CellValue, EffectiveValue, LogicalType, NumberFormat, RawCell, format_decimal,
};
use chrono_tz::Tz;

type Resolution = Result<CellValue, FailureReason>;

/// Coerces cells for one sheet, reporting every absent field to `sink`
pub struct Coercer<'a, S: DiagnosticSink + ?Sized> {
    zone: Tz,
    sink: &'a S,
}

impl<'a, S: DiagnosticSink + ?Sized> Coercer<'a, S> {
    pub fn new(zone: Tz, sink: &'a S) -> Self {
        Self { zone, sink }
    }

    /// Resolve `cell` as `target`; `None` means the field is absent
    pub fn coerce(&self, column: &str, cell: &RawCell, target: LogicalType) -> Option<CellValue> {
        match coerce_cell(cell, target, self.zone) {
            Ok(value) => Some(value),
            Err(reason) => {
                self.sink.report(CoercionFailure {
                    column: column.to_string(),
                    target,
                    display: cell.display().to_string(),
                    reason,
                });
                None
            }
        }
    }
}

/// Resolve `cell` as `target`, reading zone-less timestamps in `zone`.
///
/// Never panics on malformed input. Error-valued cells are absent for
/// every target.
pub fn coerce_cell(cell: &RawCell, target: LogicalType, zone: Tz) -> Resolution {
    if let Some(EffectiveValue::Error { kind, message }) = cell.effective() {
        return Err(FailureReason::CellError {
            kind: kind.clone(),
            message: message.clone(),
        });
    }

    match target {
        LogicalType::String => coerce_string(cell),
        LogicalType::Number => coerce_number(cell),
        LogicalType::Boolean => coerce_boolean(cell),
        LogicalType::Timestamp => coerce_timestamp(cell, zone),
    }
}

fn coerce_string(cell: &RawCell) -> Resolution {
    match cell.shape() {
        CellShape::Grid => Ok(CellValue::String(cell.display().to_string())),
        CellShape::Scalar => match cell.effective() {
            Some(EffectiveValue::Number(n)) => Ok(CellValue::String(format_decimal(*n))),
            Some(EffectiveValue::Boolean(b)) => Ok(CellValue::String(b.to_string())),
            Some(EffectiveValue::Text(text)) => Ok(CellValue::String(text.clone())),
            Some(EffectiveValue::Error { .. }) => Err(FailureReason::IncompatibleValue),
            None => Err(FailureReason::Blank),
        },
    }
}

fn coerce_number(cell: &RawCell) -> Resolution {
    match cell.effective() {
        Some(EffectiveValue::Number(n)) => match cell.number_format() {
            NumberFormat::Date | NumberFormat::Time | NumberFormat::DateTime => {
                Err(FailureReason::UnsupportedFormat(cell.number_format()))
            }
            NumberFormat::Percent => normalize_number(n * 100.0),
            NumberFormat::Unspecified
            | NumberFormat::Text
            | NumberFormat::Number
            | NumberFormat::Currency
            | NumberFormat::Scientific => normalize_number(*n),
        },
        // Typed values-only booleans count as 1/0; a grid boolean is not a number
        Some(EffectiveValue::Boolean(b)) => match cell.shape() {
            CellShape::Scalar => Ok(CellValue::Integer(i64::from(*b))),
            CellShape::Grid => Err(FailureReason::IncompatibleValue),
        },
        Some(EffectiveValue::Text(text)) => parse_number(text),
        Some(EffectiveValue::Error { .. }) => Err(FailureReason::IncompatibleValue),
        None if cell.is_blank() => Err(FailureReason::Blank),
        None => parse_number(cell.display()),
    }
}

fn coerce_boolean(cell: &RawCell) -> Resolution {
    let parsed = match cell.effective() {
        Some(EffectiveValue::Boolean(b)) => Some(*b),
        Some(EffectiveValue::Number(n)) => Some(*n != 0.0),
        Some(EffectiveValue::Text(text)) => parse_boolean(text),
        Some(EffectiveValue::Error { .. }) => return Err(FailureReason::IncompatibleValue),
        None if cell.is_blank() => return Err(FailureReason::Blank),
        None => parse_boolean(cell.display()),
    };
    parsed
        .map(CellValue::Boolean)
        .ok_or(FailureReason::Unparseable)
}

fn coerce_timestamp(cell: &RawCell, zone: Tz) -> Resolution {
    match cell.effective() {
        Some(EffectiveValue::Number(n)) => match cell.number_format() {
            NumberFormat::Unspecified | NumberFormat::Text => parse_timestamp(cell.display(), zone),
            NumberFormat::Date | NumberFormat::DateTime => parse_by_serial(*n, zone)
                .map(CellValue::Timestamp)
                .ok_or(FailureReason::SerialOutOfRange),
            NumberFormat::Number
            | NumberFormat::Percent
            | NumberFormat::Currency
            | NumberFormat::Scientific
            | NumberFormat::Time => Err(FailureReason::UnsupportedFormat(cell.number_format())),
        },
        Some(EffectiveValue::Boolean(_)) => Err(FailureReason::IncompatibleValue),
        Some(EffectiveValue::Error { .. }) => Err(FailureReason::IncompatibleValue),
        Some(EffectiveValue::Text(_)) => parse_timestamp(cell.display(), zone),
        None if cell.is_blank() => Err(FailureReason::Blank),
        None => parse_timestamp(cell.display(), zone),
    }
}

fn parse_timestamp(text: &str, zone: Tz) -> Resolution {
    parse_by_text(text, zone)
        .map(CellValue::Timestamp)
        .ok_or(FailureReason::Unparseable)
}

fn parse_number(text: &str) -> Resolution {
    text.trim()
        .parse::<f64>()
        .map_err(|_| FailureReason::Unparseable)
        .and_then(normalize_number)
}

fn parse_boolean(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Whole numbers become integers, everything else stays a float
fn normalize_number(value: f64) -> Resolution {
    if !value.is_finite() {
        return Err(FailureReason::Unparseable);
    }
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(CellValue::Integer(value as i64))
    } else {
        Ok(CellValue::Float(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number(12.0), Ok(CellValue::Integer(12)));
        assert_eq!(normalize_number(-3.0), Ok(CellValue::Integer(-3)));
        assert_eq!(normalize_number(12.3), Ok(CellValue::Float(12.3)));
        assert_eq!(normalize_number(1e300), Ok(CellValue::Float(1e300)));
        assert_eq!(normalize_number(f64::NAN), Err(FailureReason::Unparseable));
        assert_eq!(normalize_number(f64::INFINITY), Err(FailureReason::Unparseable));
    }

    #[test]
    fn test_parse_boolean_literals() {
        assert_eq!(parse_boolean("TRUE"), Some(true));
        assert_eq!(parse_boolean("False"), Some(false));
        assert_eq!(parse_boolean(" true "), Some(true));
        assert_eq!(parse_boolean("yes"), None);
        assert_eq!(parse_boolean(""), None);
    }
}
