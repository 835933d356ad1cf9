//! Event log loading.
//!
//! Reads the headerless six-column email log and converts each record into an
//! [`Event`]. Any record that does not fit the expected shape aborts the load.

use std::io::Read;
use std::path::Path;

use chrono_tz::Tz;
use summary_core::models::Event;
use summary_core::time_utils::local_from_millis;
use summary_core::{Result, SummaryError};
use tracing::debug;

/// Number of fields in every record of the event log.
pub const FIELD_COUNT: usize = 6;

/// Separator between addresses in the recipients field.
pub const RECIPIENT_DELIMITER: char = '|';

const TIMESTAMP_FIELD: usize = 0;
const SENDER_FIELD: usize = 2;
const RECIPIENTS_FIELD: usize = 3;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every event from the log at `path`, interpreting timestamps in `tz`.
pub fn load_events(path: &Path, tz: Tz) -> Result<Vec<Event>> {
    let file = std::fs::File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SummaryError::InputNotFound(path.to_path_buf())
        } else {
            SummaryError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let events = read_events(std::io::BufReader::new(file), tz)?;
    debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Parse events from any reader holding log records.
pub fn read_events<R: Read>(reader: R, tz: Tz) -> Result<Vec<Event>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut events = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        events.push(parse_record(&record, line, tz)?);
    }
    Ok(events)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_record(record: &csv::StringRecord, line: u64, tz: Tz) -> Result<Event> {
    let malformed = |reason: String| SummaryError::MalformedRecord { line, reason };

    if record.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        )));
    }

    let raw_ts = record[TIMESTAMP_FIELD].trim();
    let millis: i64 = raw_ts
        .parse()
        .map_err(|_| malformed(format!("timestamp \"{}\" is not an integer", raw_ts)))?;
    let timestamp = local_from_millis(millis, tz)
        .ok_or_else(|| malformed(format!("timestamp {} is out of range", millis)))?;

    let sender = &record[SENDER_FIELD];
    if sender.is_empty() {
        return Err(malformed("sender is empty".to_string()));
    }

    let recipients = &record[RECIPIENTS_FIELD];
    if recipients.is_empty() {
        return Err(malformed("recipient list is empty".to_string()));
    }

    Ok(Event::new(
        timestamp,
        sender,
        recipients.split(RECIPIENT_DELIMITER),
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::io::Write;
    use tempfile::TempDir;

    fn read(data: &str) -> Result<Vec<Event>> {
        read_events(data.as_bytes(), Tz::UTC)
    }

    #[test]
    fn test_reads_well_formed_records() {
        let events = read(
            "980985600000,<1@x>,alice@enron.com,bob@enron.com|carol@enron.com,,email\n\
             988675200000,<2@x>,carol@enron.com,alice@enron.com,,email\n",
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].sender, "alice@enron.com");
        assert_eq!(
            events[0].recipients,
            vec!["bob@enron.com", "carol@enron.com"]
        );
        assert_eq!(
            (events[0].timestamp.year(), events[0].timestamp.month()),
            (2001, 2)
        );
        assert_eq!(events[1].timestamp.month(), 5);
    }

    #[test]
    fn test_repeated_recipients_are_kept() {
        let events = read("0,id,a,b|b|c,,email\n").unwrap();
        assert_eq!(events[0].recipients, vec!["b", "b", "c"]);
    }

    #[test]
    fn test_timestamp_whitespace_is_tolerated() {
        let events = read(" 1000 ,id,a,b,,email\n").unwrap();
        assert_eq!(events[0].timestamp.second(), 1);
    }

    #[test]
    fn test_empty_input_yields_no_events() {
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_field_count_is_fatal() {
        let err = read("0,id,a,b,,email\n1,id,a,b\n").unwrap_err();
        match err {
            SummaryError::MalformedRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected 6 fields, found 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_timestamp_is_fatal() {
        let err = read("yesterday,id,a,b,,email\n").unwrap_err();
        assert!(matches!(err, SummaryError::MalformedRecord { line: 1, .. }));
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_fractional_timestamp_is_fatal() {
        let err = read("1000.5,id,a,b,,email\n").unwrap_err();
        assert!(matches!(err, SummaryError::MalformedRecord { .. }));
    }

    #[test]
    fn test_empty_sender_is_fatal() {
        let err = read("0,id,,b,,email\n").unwrap_err();
        assert!(err.to_string().contains("sender is empty"));
    }

    #[test]
    fn test_empty_recipients_is_fatal() {
        let err = read("0,id,a,,,email\n").unwrap_err();
        assert!(err.to_string().contains("recipient list is empty"));
    }

    #[test]
    fn test_load_events_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "980985600000,<1@x>,a,b|c,,email").unwrap();
        writeln!(file, "982195200000,<2@x>,a,c,,email").unwrap();
        drop(file);

        let events = load_events(&path, Tz::UTC).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_load_events_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_events(&dir.path().join("absent.csv"), Tz::UTC).unwrap_err();
        assert!(matches!(err, SummaryError::InputNotFound(_)));
    }
}
