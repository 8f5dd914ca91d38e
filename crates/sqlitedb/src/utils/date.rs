// Copyright 2025 Alexandre D. Díaz
use chrono::NaiveDateTime;

pub static SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn from_sqlite_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, SQLITE_DATETIME_FORMAT).ok()
}

/// Reformats a timestamp stored by SQLite (UTC). Values that don't parse are
/// returned untouched.
pub fn format_sqlite_datetime(value: &str, format: &str) -> String {
    match from_sqlite_datetime(value) {
        Some(dt) => dt.format(format).to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sqlite_datetime() {
        assert_eq!(
            format_sqlite_datetime("2024-03-05 14:07:09", "%d/%m/%Y %H:%M"),
            "05/03/2024 14:07"
        );
    }

    #[test]
    fn test_format_keeps_unparseable_values() {
        assert_eq!(format_sqlite_datetime("yesterday", "%d/%m/%Y"), "yesterday");
        assert!(from_sqlite_datetime("").is_none());
    }
}
