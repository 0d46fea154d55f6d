//! Archive timestamp parsing
//!
//! Export archives carry dates in several textual forms depending on the
//! export version:
//! - RFC 3339 / ISO-8601: `2019-03-13T16:02:06.000Z`
//! - Classic API format: `Wed Mar 13 16:02:06 +0000 2019`
//! - Stringified epoch milliseconds: `1489075284000`
//!
//! All of them normalize to `DateTime<Utc>`.

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Classic timestamp layout used by older exports and the public API
const CLASSIC_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse an archive date string into a canonical UTC timestamp
///
/// # Errors
/// Returns `Error::InvalidDateFormat` if the string matches none of the
/// supported layouts.
pub fn parse_archive_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(value, CLASSIC_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return parse_epoch_millis(value);
    }

    Err(Error::InvalidDateFormat(value.to_string()))
}

/// Parse a stringified epoch-milliseconds value (`approvedAtMsec` in old exports)
pub fn parse_epoch_millis(value: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidDateFormat(value.to_string()))?;

    DateTime::from_timestamp_millis(millis).ok_or_else(|| Error::InvalidDateFormat(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_iso_with_millis() {
        let dt = parse_archive_date("2019-03-13T16:02:06.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 3, 13, 16, 2, 6).unwrap());
    }

    #[test]
    fn test_parse_iso_with_offset_normalizes_to_utc() {
        let dt = parse_archive_date("2019-03-13T18:02:06+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 3, 13, 16, 2, 6).unwrap());
    }

    #[test]
    fn test_parse_classic_format() {
        let dt = parse_archive_date("Wed Mar 13 16:02:06 +0000 2019").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 3, 13, 16, 2, 6).unwrap());
    }

    #[test]
    fn test_parse_epoch_millis_string() {
        let dt = parse_archive_date("1489075284000").unwrap();
        assert_eq!(dt.timestamp_millis(), 1_489_075_284_000);
        assert_eq!(parse_epoch_millis("1489075284000").unwrap(), dt);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert!(parse_archive_date("  2019-03-13T16:02:06Z\n").is_ok());
    }

    #[test]
    fn test_invalid_formats_rejected() {
        for bad in ["", "yesterday", "2019-13-45", "Wed Mar 13 2019", "12ab"] {
            match parse_archive_date(bad) {
                Err(Error::InvalidDateFormat(_)) => {}
                other => panic!("expected InvalidDateFormat for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_epoch_millis_rejects_non_numeric() {
        assert!(matches!(
            parse_epoch_millis("soon"),
            Err(Error::InvalidDateFormat(_))
        ));
    }
}
