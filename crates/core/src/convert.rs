//! Tolerant conversion of raw cell values to declared field types.
//!
//! | target   | accepted input                                                  |
//! |----------|-----------------------------------------------------------------|
//! | text     | any value, rendered as displayed                                |
//! | int      | int, whole float, bool (0/1), integer text, whole decimal text |
//! | float    | int, finite float, bool (0/1), numeric text                    |
//! | bool     | bool, 0/1 numbers, `true/false/yes/no/y/n/1/0` text             |
//! | date     | Excel serial number, ISO or `dd.mm.yyyy` text, datetime text    |
//! | datetime | Excel serial number, ISO datetime text, date-only text          |
//!
//! Null converts to absent for every target. Whitespace-only text converts to
//! absent for every non-text target.

use crate::schema::FieldType;
use crate::value::FieldValue;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sheetbind_sheet::CellValue;
use thiserror::Error;

/// Excel serial day 0 is 1899-12-30 once the 1900 leap-year bug is absorbed.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// Serial number of 9999-12-31, the last date Excel can display.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A cell value that cannot be represented as the target type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert '{value}' to {target}")]
pub struct ConversionError {
    pub value: String,
    pub target: FieldType,
}

impl ConversionError {
    fn new(value: &CellValue, target: FieldType) -> Self {
        Self {
            value: value.as_str(),
            target,
        }
    }
}

/// Convert a raw cell value to `target`. Never panics.
pub fn convert(value: &CellValue, target: FieldType) -> Result<FieldValue, ConversionError> {
    if value.is_null() {
        return Ok(FieldValue::Null);
    }

    if let CellValue::String(s) = value {
        if target != FieldType::Text && s.trim().is_empty() {
            return Ok(FieldValue::Null);
        }
    }

    let converted = match target {
        FieldType::Text => Some(FieldValue::Text(value.as_str())),
        FieldType::Int => to_int(value).map(FieldValue::Int),
        FieldType::Float => to_float(value).map(FieldValue::Float),
        FieldType::Bool => to_bool(value).map(FieldValue::Bool),
        FieldType::Date => to_date(value).map(FieldValue::Date),
        FieldType::DateTime => to_datetime(value).map(FieldValue::DateTime),
    };

    converted.ok_or_else(|| ConversionError::new(value, target))
}

fn whole_float_to_int(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn to_int(value: &CellValue) -> Option<i64> {
    match value {
        CellValue::Int(i) => Some(*i),
        CellValue::Float(f) => whole_float_to_int(*f),
        CellValue::Bool(b) => Some(i64::from(*b)),
        CellValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_float_to_int))
        }
        CellValue::Null => None,
    }
}

fn to_float(value: &CellValue) -> Option<f64> {
    let f = match value {
        CellValue::Int(i) => *i as f64,
        CellValue::Float(f) => *f,
        CellValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        CellValue::String(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Null => return None,
    };
    f.is_finite().then_some(f)
}

fn to_bool(value: &CellValue) -> Option<bool> {
    match value {
        CellValue::Bool(b) => Some(*b),
        CellValue::Int(0) => Some(false),
        CellValue::Int(1) => Some(true),
        CellValue::Int(_) => None,
        CellValue::Float(f) if *f == 0.0 => Some(false),
        CellValue::Float(f) if *f == 1.0 => Some(true),
        CellValue::Float(_) => None,
        CellValue::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        CellValue::Null => None,
    }
}

fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_time(NaiveTime::MIN);
    let days = serial.floor();
    let seconds = ((serial - days) * 86_400.0).round();

    epoch
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::seconds(seconds as i64))
}

fn serial_of(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(f) => Some(*f),
        _ => None,
    }
}

fn parse_datetime_text(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn to_date(value: &CellValue) -> Option<NaiveDate> {
    if let Some(serial) = serial_of(value) {
        return excel_serial_to_datetime(serial).map(|dt| dt.date());
    }
    match value {
        CellValue::String(s) => {
            let s = s.trim();
            parse_date_text(s).or_else(|| parse_datetime_text(s).map(|dt| dt.date()))
        }
        _ => None,
    }
}

fn to_datetime(value: &CellValue) -> Option<NaiveDateTime> {
    if let Some(serial) = serial_of(value) {
        return excel_serial_to_datetime(serial);
    }
    match value {
        CellValue::String(s) => {
            let s = s.trim();
            parse_datetime_text(s)
                .or_else(|| parse_date_text(s).map(|d| d.and_time(NaiveTime::MIN)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_null_is_absent_for_every_type() {
        for ty in [
            FieldType::Text,
            FieldType::Int,
            FieldType::Float,
            FieldType::Bool,
            FieldType::Date,
            FieldType::DateTime,
        ] {
            assert_eq!(convert(&CellValue::Null, ty), Ok(FieldValue::Null));
        }
    }

    #[test]
    fn test_text_keeps_empty_string() {
        assert_eq!(convert(&text(""), FieldType::Text), Ok(FieldValue::Text(String::new())));
        assert_eq!(convert(&CellValue::Float(30.0), FieldType::Text), Ok(FieldValue::Text("30".into())));
    }

    #[test]
    fn test_blank_text_is_absent_for_typed_fields() {
        assert_eq!(convert(&text("   "), FieldType::Int), Ok(FieldValue::Null));
        assert_eq!(convert(&text(""), FieldType::Date), Ok(FieldValue::Null));
    }

    #[test]
    fn test_int_rules() {
        assert_eq!(convert(&text(" 30 "), FieldType::Int), Ok(FieldValue::Int(30)));
        assert_eq!(convert(&text("30.0"), FieldType::Int), Ok(FieldValue::Int(30)));
        assert_eq!(convert(&CellValue::Float(30.0), FieldType::Int), Ok(FieldValue::Int(30)));
        assert_eq!(convert(&CellValue::Bool(true), FieldType::Int), Ok(FieldValue::Int(1)));
        assert!(convert(&CellValue::Float(30.5), FieldType::Int).is_err());
        assert!(convert(&text("not-a-number"), FieldType::Int).is_err());
        assert!(convert(&CellValue::Float(1e300), FieldType::Int).is_err());
    }

    #[test]
    fn test_float_rules() {
        assert_eq!(convert(&text("2.5"), FieldType::Float), Ok(FieldValue::Float(2.5)));
        assert_eq!(convert(&CellValue::Int(2), FieldType::Float), Ok(FieldValue::Float(2.0)));
        assert!(convert(&text("NaN"), FieldType::Float).is_err());
        assert!(convert(&text("inf"), FieldType::Float).is_err());
    }

    #[test]
    fn test_bool_rules() {
        assert_eq!(convert(&text("Yes"), FieldType::Bool), Ok(FieldValue::Bool(true)));
        assert_eq!(convert(&text("0"), FieldType::Bool), Ok(FieldValue::Bool(false)));
        assert_eq!(convert(&CellValue::Int(1), FieldType::Bool), Ok(FieldValue::Bool(true)));
        assert!(convert(&CellValue::Int(2), FieldType::Bool).is_err());
        assert!(convert(&text("maybe"), FieldType::Bool).is_err());
    }

    #[test]
    fn test_date_rules() {
        assert_eq!(convert(&text("2024-02-29"), FieldType::Date), Ok(FieldValue::Date(date(2024, 2, 29))));
        assert_eq!(convert(&text("29.02.2024"), FieldType::Date), Ok(FieldValue::Date(date(2024, 2, 29))));
        assert_eq!(
            convert(&text("2024-02-29T10:00:00"), FieldType::Date),
            Ok(FieldValue::Date(date(2024, 2, 29)))
        );
        // 2022-01-01 as an Excel serial
        assert_eq!(convert(&CellValue::Float(44562.0), FieldType::Date), Ok(FieldValue::Date(date(2022, 1, 1))));
        assert!(convert(&text("2024-02-30"), FieldType::Date).is_err());
        assert!(convert(&CellValue::Float(-1.0), FieldType::Date).is_err());
        assert!(convert(&CellValue::Bool(true), FieldType::Date).is_err());
    }

    #[test]
    fn test_datetime_rules() {
        let noon = date(2022, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(convert(&CellValue::Float(44562.5), FieldType::DateTime), Ok(FieldValue::DateTime(noon)));
        assert_eq!(convert(&text("2022-01-01 12:00"), FieldType::DateTime), Ok(FieldValue::DateTime(noon)));
        assert_eq!(
            convert(&text("2022-01-01"), FieldType::DateTime),
            Ok(FieldValue::DateTime(date(2022, 1, 1).and_time(NaiveTime::MIN)))
        );
    }

    #[test]
    fn test_error_message() {
        let err = convert(&text("abc"), FieldType::Int).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert 'abc' to int");
    }
}
