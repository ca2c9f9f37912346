//! Coercion of values-only scalars (no display formatting, no format hint)

use crate::coercion::{FailureReason, coerce_cell};
use crate::models::{CellValue, LogicalType, RawCell, ScalarValue};
use chrono_tz::Tz;

fn coerce(value: ScalarValue, target: LogicalType) -> Result<CellValue, FailureReason> {
    coerce_cell(&RawCell::from_scalar(value), target, Tz::Asia__Tokyo)
}

fn text(s: &str) -> ScalarValue {
    ScalarValue::Text(s.to_string())
}

#[test]
fn test_text_scalar() {
    assert_eq!(
        coerce(text("sheet"), LogicalType::String),
        Ok(CellValue::String("sheet".to_string()))
    );
    assert_eq!(coerce(text("12.3"), LogicalType::Number), Ok(CellValue::Float(12.3)));
    assert_eq!(coerce(text("12.0"), LogicalType::Number), Ok(CellValue::Integer(12)));
    assert_eq!(coerce(text("hello"), LogicalType::Number), Err(FailureReason::Unparseable));
    assert_eq!(coerce(text("true"), LogicalType::Boolean), Ok(CellValue::Boolean(true)));
    assert_eq!(coerce(text("false"), LogicalType::Boolean), Ok(CellValue::Boolean(false)));
}

#[test]
fn test_text_scalar_timestamps() {
    let cases = [
        ("2000/01/02 3:04:05", "2000-01-02T03:04:05+09:00"),
        ("2000/01/02 3:04:05Z", "2000-01-02T03:04:05+00:00"),
        ("2000/01/02", "2000-01-02T00:00:00+09:00"),
    ];

    for (input, expected) in cases {
        match coerce(text(input), LogicalType::Timestamp) {
            Ok(CellValue::Timestamp(t)) => assert_eq!(t.to_rfc3339(), expected),
            other => panic!("{} should parse, got {:?}", input, other),
        }
    }
}

#[test]
fn test_number_scalar() {
    assert_eq!(
        coerce(ScalarValue::Number(12.3), LogicalType::Number),
        Ok(CellValue::Float(12.3))
    );
    assert_eq!(
        coerce(ScalarValue::Number(12.0), LogicalType::Number),
        Ok(CellValue::Integer(12))
    );
    assert_eq!(
        coerce(ScalarValue::Number(12.3), LogicalType::String),
        Ok(CellValue::String("12.3".to_string()))
    );
    assert_eq!(
        coerce(ScalarValue::Number(12.0), LogicalType::String),
        Ok(CellValue::String("12".to_string()))
    );
    assert_eq!(
        coerce(ScalarValue::Number(0.0), LogicalType::Boolean),
        Ok(CellValue::Boolean(false))
    );
    assert_eq!(
        coerce(ScalarValue::Number(1.0), LogicalType::Boolean),
        Ok(CellValue::Boolean(true))
    );
}

#[test]
fn test_number_scalar_is_not_a_timestamp() {
    assert!(coerce(ScalarValue::Number(12.3), LogicalType::Timestamp).is_err());
}

#[test]
fn test_boolean_scalar() {
    assert_eq!(
        coerce(ScalarValue::Boolean(true), LogicalType::Boolean),
        Ok(CellValue::Boolean(true))
    );
    assert_eq!(
        coerce(ScalarValue::Boolean(false), LogicalType::String),
        Ok(CellValue::String("false".to_string()))
    );
    assert_eq!(
        coerce(ScalarValue::Boolean(true), LogicalType::Number),
        Ok(CellValue::Integer(1))
    );
    assert_eq!(
        coerce(ScalarValue::Boolean(false), LogicalType::Number),
        Ok(CellValue::Integer(0))
    );
    assert_eq!(
        coerce(ScalarValue::Boolean(true), LogicalType::Timestamp),
        Err(FailureReason::IncompatibleValue)
    );
}

#[test]
fn test_null_scalar_is_absent_for_every_target() {
    for target in [
        LogicalType::String,
        LogicalType::Number,
        LogicalType::Boolean,
        LogicalType::Timestamp,
    ] {
        assert_eq!(coerce(ScalarValue::Null, target), Err(FailureReason::Blank));
    }
}
