mod config;
mod error;
mod types;

#[allow(clippy::all, non_camel_case_types)]
mod pb {
    tonic::include_proto!("rideshare");
}

use chrono::{DateTime, SecondsFormat, Utc};
pub use config::*;
pub use error::*;
pub use pb::*;
pub use types::*;

/// format a booking time as RFC 3339 in UTC, truncated to whole seconds
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::{SubsecRound, TimeZone};

    use super::*;

    #[test]
    fn format_timestamp_should_use_utc_seconds() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(format_timestamp(ts), "2024-05-01T12:30:05Z");
    }

    #[test]
    fn format_timestamp_should_drop_subseconds() {
        let ts = Utc.timestamp_opt(1_714_566_605, 987_654_321).unwrap();
        assert_eq!(format_timestamp(ts), "2024-05-01T12:30:05Z");
    }

    #[test]
    fn parse_timestamp_should_normalize_offset() {
        let ts = parse_timestamp("2024-05-01T05:30:05-07:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap());
    }

    #[test]
    fn timestamp_should_round_trip_at_second_precision() {
        let now = Utc::now().trunc_subsecs(0);
        let parsed = parse_timestamp(&format_timestamp(now)).unwrap();
        assert_eq!(parsed, now);
        assert_eq!(format_timestamp(parsed), format_timestamp(now));
    }

    #[test]
    fn parse_timestamp_should_reject_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
