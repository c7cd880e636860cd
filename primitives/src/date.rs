use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::FieldValue;

/// Formats of naive date-times that the backend is known to send, interpreted as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a field value into a date.
///
/// Accepts RFC 3339 strings, naive date-times and plain `YYYY-MM-DD` dates (as UTC)
/// and numbers as millisecond timestamps. Anything else is `None`.
pub fn parse_date(value: &FieldValue) -> Option<DateTime<Utc>> {
    match value {
        FieldValue::String(string) => parse_date_str(string.trim()),
        FieldValue::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn parse_date_str(string: &str) -> Option<DateTime<Utc>> {
    if string.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(string) {
        return Some(datetime.with_timezone(&Utc));
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(string, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(string, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn parses_supported_formats() {
        let cases = [
            ("2024-03-01T10:20:30Z", utc(2024, 3, 1, 10, 20, 30)),
            ("2024-03-01T12:20:30+02:00", utc(2024, 3, 1, 10, 20, 30)),
            ("2024-03-01T10:20:30.123", utc(2024, 3, 1, 10, 20, 30) + chrono::Duration::milliseconds(123)),
            ("2024-03-01 10:20:30", utc(2024, 3, 1, 10, 20, 30)),
            ("2024-03-01 10:20", utc(2024, 3, 1, 10, 20, 0)),
            ("2024-03-01", utc(2024, 3, 1, 0, 0, 0)),
        ];

        for (input, expected) in cases {
            assert_eq!(Some(expected), parse_date(&FieldValue::from(input)), "input: {input}");
        }
    }

    #[test]
    fn parses_millisecond_timestamps() {
        assert_eq!(
            Some(utc(2024, 1, 5, 0, 0, 0)),
            parse_date(&FieldValue::from(json!(1_704_412_800_000_i64)))
        );
    }

    #[test]
    fn rejects_everything_else() {
        for value in [
            FieldValue::Null,
            FieldValue::from(""),
            FieldValue::from("yesterday"),
            FieldValue::from("2024-13-45"),
            FieldValue::Bool(true),
            FieldValue::from(json!(["2024-01-01"])),
        ] {
            assert_eq!(None, parse_date(&value), "value: {value:?}");
        }
    }
}
