use std::ffi::OsString;
use std::path::PathBuf;

use chrono_tz::Tz;
use clap::error::ErrorKind;
use clap::Parser;

use crate::error::{Result, SummaryError};
use crate::time_utils::{resolve_timezone, AUTO_TIMEZONE};

/// How many of the most prolific senders are charted by default.
pub const DEFAULT_TOP_SENDERS: usize = 5;

const INSTRUCTIONS: &str =
    "Usage: enron-summary <input file>\nE.g.: enron-summary enron-event-history-all.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Summarize an email event log and chart its most prolific senders
#[derive(Parser, Debug, Clone)]
#[command(
    name = "enron-summary",
    about = "Summarize an email event log and chart its most prolific senders",
    version
)]
pub struct Settings {
    /// Event log: timestamp_ms,message_id,sender,recipients,topic,mode (no header)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of top senders to chart
    #[arg(
        long,
        default_value_t = DEFAULT_TOP_SENDERS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub top: usize,

    /// Timezone used to bucket timestamps (IANA name, or auto for the system zone)
    #[arg(long, default_value = AUTO_TIMEZONE)]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

impl Settings {
    /// Parse settings from an explicit argument list (program name first).
    ///
    /// `--help` and `--version` are printed by clap and end the process with
    /// status 0. Every other parse failure becomes [`SummaryError::Usage`]
    /// carrying the usage text.
    pub fn try_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(settings) => Ok(settings),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
                ) =>
            {
                err.exit()
            }
            Err(err) => Err(SummaryError::Usage(format!(
                "{}\n{}",
                err.render().to_string().trim_end(),
                INSTRUCTIONS
            ))),
        }
    }

    /// Resolve the `--timezone` value.
    pub fn resolved_timezone(&self) -> Result<Tz> {
        resolve_timezone(&self.timezone)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
