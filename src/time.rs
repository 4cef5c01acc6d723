//! Timestamp utilities

use chrono::Local;

/// Current local time at minute precision, e.g. `2025-11-19T05:30`.
///
/// Every record's `created_at` column is stamped with this format; the
/// frontend and CSV interchange both round-trip it as an opaque string.
pub fn now_minute() -> String {
    Local::now().format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_minute_shape() {
        let stamp = now_minute();
        // YYYY-MM-DDTHH:MM
        assert_eq!(stamp.len(), 16);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], "T");
        assert_eq!(&stamp[13..14], ":");
    }

    #[test]
    fn test_now_minute_parses_back() {
        let stamp = now_minute();
        let parsed = chrono::NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%dT%H:%M");
        assert!(parsed.is_ok());
    }
}
