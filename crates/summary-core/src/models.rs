use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::quarters::QuarterBucket;

/// One logged email: who sent it, to whom, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Wall-clock time of the message in the configured timezone.
    pub timestamp: NaiveDateTime,
    /// Sender address.
    pub sender: String,
    /// Recipient addresses in the order they appear in the log, repeats kept.
    pub recipients: Vec<String>,
}

impl Event {
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        recipients: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            recipients: recipients.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `address` occurs anywhere in the recipient list.
    pub fn is_addressed_to(&self, address: &str) -> bool {
        self.recipients.iter().any(|r| r == address)
    }

    /// Quarter the event falls into.
    pub fn quarter(&self) -> QuarterBucket {
        QuarterBucket::containing(self.timestamp)
    }
}

/// Sent and received totals for one address.
///
/// Field order matches the `person,sent,received` header of the summary CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub person: String,
    pub sent: u64,
    pub received: u64,
}

/// What a [`QuarterlyTable`] counts in each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Messages sent by the column's person.
    SentVolume,
    /// Distinct senders who wrote to the column's person.
    UniqueContacts,
}

/// Dense bucket × person count table.
///
/// Rows are quarters in ascending order, columns are persons in the order
/// they were supplied. Every cell is present; missing activity is `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterlyTable {
    pub kind: SeriesKind,
    buckets: Vec<QuarterBucket>,
    persons: Vec<String>,
    /// `counts[row][column]`.
    counts: Vec<Vec<u64>>,
}

impl QuarterlyTable {
    /// Build a dense table by evaluating `count` for every bucket × person.
    ///
    /// This is the reindexing step: cells absent from whatever sparse source
    /// `count` consults must come back as `0`.
    pub fn from_fn(
        kind: SeriesKind,
        buckets: Vec<QuarterBucket>,
        persons: Vec<String>,
        count: impl Fn(QuarterBucket, &str) -> u64,
    ) -> Self {
        let counts = buckets
            .iter()
            .map(|bucket| persons.iter().map(|p| count(*bucket, p)).collect())
            .collect();
        Self {
            kind,
            buckets,
            persons,
            counts,
        }
    }

    pub fn buckets(&self) -> &[QuarterBucket] {
        &self.buckets
    }

    pub fn persons(&self) -> &[String] {
        &self.persons
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() || self.persons.is_empty()
    }

    /// Count for `person` in `bucket`, or `None` if either is not in the table.
    pub fn get(&self, bucket: QuarterBucket, person: &str) -> Option<u64> {
        let row = self.buckets.binary_search(&bucket).ok()?;
        let col = self.persons.iter().position(|p| p == person)?;
        Some(self.counts[row][col])
    }

    /// All counts for one person, one per bucket.
    pub fn column(&self, person: &str) -> Option<Vec<u64>> {
        let col = self.persons.iter().position(|p| p == person)?;
        Some(self.counts.iter().map(|row| row[col]).collect())
    }

    /// Largest single cell value.
    pub fn max_cell(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Largest per-bucket sum across all persons (the height of a stacked bar).
    pub fn max_row_total(&self) -> u64 {
        self.counts
            .iter()
            .map(|row| row.iter().sum::<u64>())
            .max()
            .unwrap_or(0)
    }
}
