use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// "p.m." / "a.m." as written by the ticketing system's export
static DOTTED_MERIDIEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([ap])\.m\.").unwrap());

/// Export format after meridiem normalization, e.g. "2024-03-05, 2:15 pm"
const CLOSE_DATE_FORMAT: &str = "%Y-%m-%d, %I:%M %p";

/// Rendering of native spreadsheet dates by the workbook reader
const ISO_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a close timestamp. Malformed values coerce to `None`.
pub fn parse_close_date(raw: &str) -> Option<NaiveDateTime> {
    let normalized = DOTTED_MERIDIEM_PATTERN.replace_all(raw.trim(), "${1}m");

    NaiveDateTime::parse_from_str(&normalized, CLOSE_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, ISO_DATE_FORMAT))
        .ok()
}

/// Month bucket as `YYYY-MM`
pub fn month_key(date: &NaiveDateTime) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_dotted_meridiem() {
        let date = parse_close_date("2024-03-05, 2:15 p.m.").unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(date.hour(), 14);
        assert_eq!(date.minute(), 15);

        let morning = parse_close_date("2024-11-30, 11:05 a.m.").unwrap();
        assert_eq!(morning.hour(), 11);
    }

    #[test]
    fn test_parse_plain_meridiem_and_iso() {
        assert_eq!(parse_close_date("2024-03-05, 12:00 AM").unwrap().hour(), 0);
        assert!(parse_close_date("2024-03-05 16:45:00").is_some());
    }

    #[test]
    fn test_malformed_dates_are_missing() {
        assert!(parse_close_date("").is_none());
        assert!(parse_close_date("yesterday").is_none());
        assert!(parse_close_date("2024-13-05, 2:15 p.m.").is_none());
    }

    #[test]
    fn test_month_key() {
        let date = parse_close_date("2024-03-05, 2:15 p.m.").unwrap();
        assert_eq!(month_key(&date), "2024-03");
    }
}
