//! Summary CSV output.

use std::path::Path;

use summary_core::models::PersonSummary;
use summary_core::{Result, SummaryError};
use tracing::debug;

/// Write `summary` to `path` as `person,sent,received` with a header row.
pub fn write_summary_csv(path: &Path, summary: &[PersonSummary]) -> Result<()> {
    let write_err = |source: std::io::Error| SummaryError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(write_err)?;
    let mut wtr = csv::Writer::from_writer(file);

    if summary.is_empty() {
        // `serialize` only emits the header alongside the first row.
        wtr.write_record(["person", "sent", "received"])?;
    }
    for row in summary {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(write_err)?;

    debug!("Wrote {} summary rows to {}", summary.len(), path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
