//! Parsing and formatting of the naive (zone-less) timestamps stored with
//! weather records.
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};

/// Full timestamp form, e.g. `2024-01-31T06:30:00`.
const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
/// Date-only form, e.g. `2024-01-31`. Interpreted as midnight.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(
    naive_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

pub use naive_timestamp::{deserialize, option, serialize};

/// Parse a timestamp given in a query string. Accepts either the full form or
/// a bare date.
pub fn parse(value: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    let value = value.trim();
    PrimitiveDateTime::parse(value, DATE_TIME_FORMAT)
        .or_else(|_| Date::parse(value, DATE_FORMAT).map(Date::midnight))
}

/// Convert a unix timestamp to a naive UTC timestamp.
pub fn from_unix(seconds: i64) -> Result<PrimitiveDateTime, time::error::ComponentRange> {
    let utc = OffsetDateTime::from_unix_timestamp(seconds)?.to_offset(UtcOffset::UTC);
    Ok(PrimitiveDateTime::new(utc.date(), utc.time()))
}

/// The current time as a naive UTC timestamp.
pub fn now_utc() -> PrimitiveDateTime {
    let current_time = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(current_time.date(), current_time.time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_full_timestamp() {
        assert_eq!(parse("2024-01-31T06:30:15").unwrap(), datetime!(2024-01-31 06:30:15));
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        assert_eq!(parse("2024-02-01").unwrap(), datetime!(2024-02-01 00:00:00));
    }

    #[test]
    fn rejects_other_forms() {
        assert!(parse("01/02/2024").is_err());
        assert!(parse("2024-13-01").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn converts_unix_seconds() {
        assert_eq!(from_unix(1_704_067_200).unwrap(), datetime!(2024-01-01 00:00:00));
    }

    #[test]
    fn serde_round_trips_through_json() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "super::naive_timestamp")]
            at: PrimitiveDateTime,
        }
        let json = serde_json::to_string(&Wrapper {
            at: datetime!(2024-03-05 07:08:09),
        })
        .unwrap();
        assert_eq!(json, r#"{"at":"2024-03-05T07:08:09"}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, datetime!(2024-03-05 07:08:09));
    }
}
