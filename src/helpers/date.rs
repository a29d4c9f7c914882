//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

/// Format date in full format (like "January 5, 2024")
pub fn long_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Format date in abbreviated format (like "Jan 5, 2024")
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// Format a date in ISO 8601 for `<time datetime>`
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Calendar year of a date
pub fn year<Tz: TimeZone>(date: &DateTime<Tz>) -> i32 {
    date.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_long_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(long_date(&date), "January 5, 2024");
    }

    #[test]
    fn test_short_date() {
        let date = Utc.with_ymd_and_hms(2024, 11, 15, 10, 30, 0).unwrap();
        assert_eq!(short_date(&date), "Nov 15, 2024");
    }

    #[test]
    fn test_date_xml() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(date_xml(&date), "2024-01-05T10:30:00+00:00");
        assert_eq!(year(&date), 2024);
    }
}
