use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{Result, SummaryError};

/// Sentinel accepted by `--timezone` meaning "whatever the system uses".
pub const AUTO_TIMEZONE: &str = "auto";

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a `--timezone` value to a [`Tz`].
///
/// `"auto"` uses the system timezone, falling back to UTC with a warning if
/// the detected name is not in the tz database. Any other value must be a
/// valid IANA identifier.
pub fn resolve_timezone(name: &str) -> Result<Tz> {
    if name.eq_ignore_ascii_case(AUTO_TIMEZONE) {
        let detected = get_system_timezone();
        return Ok(detected.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "system timezone \"{}\" not recognised, falling back to UTC",
                detected
            );
            Tz::UTC
        }));
    }

    name.parse::<Tz>()
        .map_err(|_| SummaryError::Config(format!("unknown timezone \"{}\"", name)))
}

// ── Epoch conversion ──────────────────────────────────────────────────────────

/// Convert a millisecond Unix timestamp to wall-clock time in `tz`.
///
/// Returns `None` when the value lies outside chrono's representable range.
pub fn local_from_millis(millis: i64, tz: Tz) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&tz).naive_local())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_resolve_explicit_timezone() {
        assert_eq!(resolve_timezone("UTC").unwrap(), Tz::UTC);
        assert_eq!(
            resolve_timezone("America/Chicago").unwrap(),
            Tz::America__Chicago
        );
    }

    #[test]
    fn test_resolve_invalid_timezone_is_config_error() {
        let err = resolve_timezone("Mars/Olympus").unwrap_err();
        assert!(matches!(err, SummaryError::Config(_)));
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_resolve_auto_never_fails() {
        assert!(resolve_timezone("auto").is_ok());
        assert!(resolve_timezone("AUTO").is_ok());
    }

    #[test]
    fn test_local_from_millis_utc() {
        // 2001-02-01T00:00:00Z
        let ts = local_from_millis(980_985_600_000, Tz::UTC).unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2001, 2, 1));
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn test_local_from_millis_keeps_milliseconds() {
        let ts = local_from_millis(1_500, Tz::UTC).unwrap();
        assert_eq!(ts.second(), 1);
        assert_eq!(ts.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_local_from_millis_applies_offset() {
        // 2001-01-01T03:00:00Z is still New Year's Eve in Chicago (UTC-6).
        let ts = local_from_millis(978_318_000_000, Tz::America__Chicago).unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2000, 12, 31));
        assert_eq!(ts.hour(), 21);
    }

    #[test]
    fn test_local_from_millis_out_of_range() {
        assert!(local_from_millis(i64::MAX, Tz::UTC).is_none());
    }
}
