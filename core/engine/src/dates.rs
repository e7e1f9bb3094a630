//! FILENAME: core/engine/src/dates.rs
//! PURPOSE: Parsing and formatting of priority/publication dates.
//! CONTEXT: Dates arrive as spreadsheet date cells, Excel serial numbers or
//! text in a handful of common layouts. Reports print them as `DD-MM-YYYY`
//! (narrative table) or `DD.MM.YYYY` (filing geography table).

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::cell::CellValue;

/// Report layout used by the narrative patent table.
pub const DASHED_DATE: &str = "%d-%m-%Y";

/// Report layout used by the filing geography table.
pub const DOTTED_DATE: &str = "%d.%m.%Y";

/// Text layouts accepted for date cells, tried in order.
const DATETIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d-%m-%Y", "%Y/%m/%d", "%m/%d/%Y", "%Y.%m.%d"];

#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot interpret '{value}' as a date")]
pub struct DateParseError {
    pub value: String,
}

/// Converts an Excel serial day number (1900 date system) to a timestamp.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Interprets a cell as a date.
///
/// Returns `Ok(None)` for empty cells so callers can decide how to render a
/// missing date; anything non-empty that cannot be read is an error.
pub fn parse_date(value: &CellValue) -> Result<Option<NaiveDateTime>, DateParseError> {
    match value {
        CellValue::Empty => Ok(None),
        CellValue::Date(dt) => Ok(Some(*dt)),
        CellValue::Number(n) => from_excel_serial(*n)
            .map(Some)
            .ok_or_else(|| DateParseError { value: value.display() }),
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            parse_date_text(s)
                .map(Some)
                .ok_or_else(|| DateParseError { value: s.to_string() })
        }
        CellValue::Boolean(_) => Err(DateParseError { value: value.display() }),
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt);
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, layout) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Formats a date cell with the given `strftime` layout.
/// An empty cell formats as an empty string.
pub fn format_date(value: &CellValue, layout: &str) -> Result<String, DateParseError> {
    Ok(parse_date(value)?
        .map(|dt| dt.format(layout).to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_text_in_report_layouts() {
        let v = CellValue::text("2019-04-15 00:00:00");
        assert_eq!(format_date(&v, DASHED_DATE).unwrap(), "15-04-2019");
        assert_eq!(format_date(&v, DOTTED_DATE).unwrap(), "15.04.2019");
    }

    #[test]
    fn reads_dotted_text() {
        let v = CellValue::text("01.02.2003");
        assert_eq!(format_date(&v, DASHED_DATE).unwrap(), "01-02-2003");
    }

    #[test]
    fn reads_excel_serial() {
        // 43831 = 2020-01-01
        let v = CellValue::Number(43831.0);
        assert_eq!(format_date(&v, DOTTED_DATE).unwrap(), "01.01.2020");
    }

    #[test]
    fn empty_formats_as_empty() {
        assert_eq!(format_date(&CellValue::Empty, DOTTED_DATE).unwrap(), "");
    }

    #[test]
    fn garbage_is_an_error() {
        let err = format_date(&CellValue::text("soon"), DOTTED_DATE).unwrap_err();
        assert_eq!(err.value, "soon");
    }
}
