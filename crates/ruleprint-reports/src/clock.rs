//! Time source for the report timestamp.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    /// Parses an RFC 3339 timestamp such as `2024-03-01T09:30:00+01:00`.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// ISO 8601 with a numeric offset at second precision, e.g. `2024-03-01T09:30:00+00:00`.
pub fn format_timestamp(at: DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let clock = FixedClock::parse("2024-03-01T09:30:00+01:00").unwrap();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_format_keeps_offset() {
        let clock = FixedClock::parse("2024-03-01T09:30:00+01:00").unwrap();
        assert_eq!(format_timestamp(clock.now()), "2024-03-01T09:30:00+01:00");
    }

    #[test]
    fn test_format_utc_uses_numeric_offset() {
        let clock = FixedClock::parse("2024-03-01T08:30:00Z").unwrap();
        assert_eq!(format_timestamp(clock.now()), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_format_drops_subseconds() {
        let clock = FixedClock::parse("2024-03-01T08:30:00.987654+05:30").unwrap();
        assert_eq!(format_timestamp(clock.now()), "2024-03-01T08:30:00+05:30");
    }

    #[test]
    fn test_system_clock_round_trips() {
        let formatted = format_timestamp(SystemClock.now());
        assert!(DateTime::parse_from_rfc3339(&formatted).is_ok());
    }
}
