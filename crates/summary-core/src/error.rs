use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the email summary pipeline.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The command line could not be parsed; carries the rendered usage text.
    #[error("{0}")]
    Usage(String),

    /// The input path does not resolve to a readable file.
    #[error("File {0} not found")]
    InputNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record of the event log does not have the expected shape.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// Low-level CSV reader or writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An output artifact could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The chart backend failed to draw or encode a figure.
    #[error("Chart error: {0}")]
    Chart(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SummaryError {
    /// Process exit code for this error.
    ///
    /// Bad usage and a missing input file get distinct codes; everything
    /// that goes wrong once the input has been opened shares the rest.
    pub fn exit_code(&self) -> u8 {
        match self {
            SummaryError::Usage(_) | SummaryError::Config(_) => 1,
            SummaryError::InputNotFound(_) | SummaryError::FileRead { .. } => 2,
            SummaryError::MalformedRecord { .. } | SummaryError::Csv(_) => 3,
            SummaryError::FileWrite { .. }
            | SummaryError::Chart(_)
            | SummaryError::Io(_)
            | SummaryError::Other(_) => 4,
        }
    }
}

/// Convenience alias used throughout the summary crates.
pub type Result<T> = std::result::Result<T, SummaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_input_not_found() {
        let err = SummaryError::InputNotFound(PathBuf::from("/missing/events.csv"));
        assert_eq!(err.to_string(), "File /missing/events.csv not found");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SummaryError::FileRead {
            path: PathBuf::from("/some/events.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/events.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_malformed_record() {
        let err = SummaryError::MalformedRecord {
            line: 7,
            reason: "expected 6 fields, found 4".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed record at line 7: expected 6 fields, found 4"
        );
    }

    #[test]
    fn test_error_display_chart() {
        let err = SummaryError::Chart("backend failure".to_string());
        assert_eq!(err.to_string(), "Chart error: backend failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = SummaryError::Config("unknown timezone Mars/Base".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown timezone Mars/Base"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: SummaryError = io_err.into();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_exit_codes_distinguish_usage_and_missing_input() {
        let usage = SummaryError::Usage("usage".to_string());
        let missing = SummaryError::InputNotFound(PathBuf::from("x.csv"));
        let malformed = SummaryError::MalformedRecord {
            line: 1,
            reason: "bad".to_string(),
        };
        let write = SummaryError::FileWrite {
            path: PathBuf::from("out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "nope"),
        };

        assert_eq!(usage.exit_code(), 1);
        assert_eq!(missing.exit_code(), 2);
        assert_eq!(malformed.exit_code(), 3);
        assert_eq!(write.exit_code(), 4);
        assert!([usage, missing, malformed, write]
            .iter()
            .all(|e| e.exit_code() != 0));
    }
}
