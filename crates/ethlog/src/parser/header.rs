use chrono::{NaiveDate, NaiveDateTime};
use grep_regex::{RegexCaptures, RegexMatcher};

use super::grammar::{capture, compile, named};
use super::model::{Header, ParseError};
use super::UPSTREAM_YEAR;

/// Parses `STATUS[MM-DD|HH:MM:SS.mmm]` header columns.
///
/// The upstream logger omits the year, so every timestamp is placed in
/// `UPSTREAM_YEAR`. No attempt is made to infer the real year.
pub struct HeaderParser {
    matcher: RegexMatcher,
}

impl HeaderParser {
    pub fn new() -> Result<Self, ParseError> {
        let pattern = concat!(
            r"^(?P<status>.+)\[(?P<timestamp>",
            r"(?P<month>[0-9]{2})-(?P<day>[0-9]{2})\|",
            r"(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})\.(?P<millis>[0-9]{3})",
            r")\]",
        );
        Ok(Self { matcher: compile(pattern)? })
    }

    pub fn parse(&self, column: &str) -> Result<Header, ParseError> {
        let caps = capture(&self.matcher, column)?
            .ok_or_else(|| ParseError::InvalidHeader(column.to_string()))?;

        let status = named(&self.matcher, &caps, column, "status")
            .ok_or_else(|| ParseError::InvalidHeader(column.to_string()))?;
        let raw = named(&self.matcher, &caps, column, "timestamp")
            .ok_or_else(|| ParseError::InvalidHeader(column.to_string()))?;

        Ok(Header {
            status: status.trim_end().to_string(),
            timestamp: self.timestamp(&caps, column, raw)?,
        })
    }

    fn timestamp(&self, caps: &RegexCaptures, column: &str, raw: &str) -> Result<NaiveDateTime, ParseError> {
        let part = |name: &str| -> Result<u32, ParseError> {
            named(&self.matcher, caps, column, name)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| ParseError::InvalidTimestamp(raw.to_string()))
        };

        let (month, day) = (part("month")?, part("day")?);
        let (hour, minute, second, millis) =
            (part("hour")?, part("minute")?, part("second")?, part("millis")?);

        NaiveDate::from_ymd_opt(UPSTREAM_YEAR, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, minute, second, millis))
            .ok_or_else(|| ParseError::InvalidTimestamp(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn parser() -> HeaderParser {
        HeaderParser::new().expect("static pattern")
    }

    #[test]
    fn test_parse_debug_header() {
        let header = parser().parse("DEBUG[10-11|08:21:00.588]").unwrap();

        assert_eq!(header.status, "DEBUG");
        assert_eq!(header.timestamp.month(), 10);
        assert_eq!(header.timestamp.day(), 11);
        assert_eq!(header.timestamp.hour(), 8);
        assert_eq!(header.timestamp.minute(), 21);
        assert_eq!(header.timestamp.second(), 0);
        assert_eq!(header.timestamp.nanosecond(), 588_000_000);
    }

    #[test]
    fn test_padded_status_is_trimmed() {
        let header = parser().parse("INFO [10-24|12:31:26.434]").unwrap();
        assert_eq!(header.status, "INFO");
    }

    #[test]
    fn test_missing_year_defaults_to_year_zero() {
        // upstream limitation: there is no year in the log, none is guessed
        let header = parser().parse("DEBUG[10-11|08:21:00.588]").unwrap();
        assert_eq!(header.timestamp.year(), 0);

        // year 0 is a leap year in the proleptic calendar
        let leap = parser().parse("DEBUG[02-29|00:00:00.000]").unwrap();
        assert_eq!((leap.timestamp.month(), leap.timestamp.day()), (2, 29));
    }

    #[test]
    fn test_layout_mismatch_names_column() {
        for column in [
            "DEBUG[10-11 08:21:00.588]",
            "DEBUG[2023-10-11|08:21:00.588]",
            "DEBUG[10-11|08:21:00]",
            "[10-11|08:21:00.588]",
        ] {
            match parser().parse(column) {
                Err(ParseError::InvalidHeader(raw)) => assert_eq!(raw, column),
                other => panic!("expected InvalidHeader for {:?}, got {:?}", column, other),
            }
        }
    }

    #[test]
    fn test_out_of_range_values_name_timestamp() {
        for (column, raw) in [
            ("DEBUG[13-11|08:21:00.588]", "13-11|08:21:00.588"),
            ("DEBUG[02-30|08:21:00.588]", "02-30|08:21:00.588"),
            ("DEBUG[10-11|25:21:00.588]", "10-11|25:21:00.588"),
        ] {
            match parser().parse(column) {
                Err(ParseError::InvalidTimestamp(s)) => assert_eq!(s, raw),
                other => panic!("expected InvalidTimestamp for {:?}, got {:?}", column, other),
            }
        }
    }
}
