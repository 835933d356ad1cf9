use std::path::{Path, PathBuf};

use crate::error::{Result, SummaryError};

/// Artifact locations derived from the input file: `<dir>/<stem>-<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub summary_csv: PathBuf,
    pub sent_chart: PathBuf,
    pub received_chart: PathBuf,
}

impl OutputPaths {
    /// Resolve `input` and derive the three output paths next to it.
    ///
    /// Fails with [`SummaryError::InputNotFound`] when `input` is not an
    /// existing regular file.
    pub fn for_input(input: &Path) -> Result<Self> {
        if !input.is_file() {
            return Err(SummaryError::InputNotFound(input.to_path_buf()));
        }
        let resolved = input
            .canonicalize()
            .map_err(|_| SummaryError::InputNotFound(input.to_path_buf()))?;
        Ok(Self::beside(&resolved))
    }

    /// Derive output paths from an already-resolved input path.
    pub fn beside(resolved: &Path) -> Self {
        let dir = resolved.parent().unwrap_or_else(|| Path::new("."));
        let stem = resolved
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let with_suffix = |suffix: &str| dir.join(format!("{}-{}", stem, suffix));

        Self {
            summary_csv: with_suffix("summary.csv"),
            sent_chart: with_suffix("top-sender-sent.png"),
            received_chart: with_suffix("top-sender-received.png"),
        }
    }

    /// All three paths, in the order they are written.
    pub fn all(&self) -> [&Path; 3] {
        [&self.summary_csv, &self.sent_chart, &self.received_chart]
    }
}
