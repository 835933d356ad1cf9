//! Aggregation pipeline for the email summary.
//!
//! Runs the person tally, top-sender selection and both quarterly series
//! over a loaded event table, returning an [`EmailAnalysis`] ready for the
//! writers.

use std::time::Instant;

use summary_core::models::{Event, PersonSummary, QuarterlyTable};
use tracing::info;

use crate::aggregator::PersonAggregator;
use crate::timeline::QuarterlyAggregator;

// ── Public types ──────────────────────────────────────────────────────────────

/// Counters produced alongside the analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisMetadata {
    /// Number of events aggregated.
    pub events_processed: usize,
    /// Number of distinct addresses in the summary.
    pub persons: usize,
    /// Number of quarters spanned by the log.
    pub buckets: usize,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_events`].
#[derive(Debug, Clone)]
pub struct EmailAnalysis {
    /// Per-person totals, sorted by `sent` descending.
    pub summary: Vec<PersonSummary>,
    /// The leading persons of `summary`.
    pub top_senders: Vec<String>,
    /// Messages sent per quarter by each top sender.
    pub sent_volume: QuarterlyTable,
    /// Distinct incoming contacts per quarter for each top sender.
    pub unique_contacts: QuarterlyTable,
    /// Counters about this run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full aggregation over `events`.
///
/// 1. Tally sent/received per person and sort by sent.
/// 2. Take the first `top_n` persons.
/// 3. Build the sent-volume and unique-contacts quarterly tables.
pub fn analyze_events(events: &[Event], top_n: usize) -> EmailAnalysis {
    let start = Instant::now();

    // ── Step 1: Person summary ────────────────────────────────────────────────
    let summary = PersonAggregator::summarize(events);

    // ── Step 2: Top senders ───────────────────────────────────────────────────
    let top_senders = PersonAggregator::top_senders(&summary, top_n);
    info!("Top {} senders: {:?}", top_senders.len(), top_senders);

    // ── Step 3: Quarterly series ──────────────────────────────────────────────
    let sent_volume = QuarterlyAggregator::sent_volume(events, &top_senders);
    let unique_contacts = QuarterlyAggregator::unique_contacts(events, &top_senders);

    let metadata = AnalysisMetadata {
        events_processed: events.len(),
        persons: summary.len(),
        buckets: sent_volume.buckets().len(),
        aggregate_time_seconds: start.elapsed().as_secs_f64(),
    };
    info!(
        "Aggregated {} events: {} persons over {} quarters",
        metadata.events_processed, metadata.persons, metadata.buckets
    );

    EmailAnalysis {
        summary,
        top_senders,
        sent_volume,
        unique_contacts,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
