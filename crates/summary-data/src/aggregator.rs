//! Per-person sent/received tallies and top-sender selection.

use std::collections::BTreeMap;

use summary_core::models::{Event, PersonSummary};
use tracing::debug;

// ── PersonCounts ──────────────────────────────────────────────────────────────

/// Running totals for one address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonCounts {
    pub sent: u64,
    pub received: u64,
}

// ── PersonAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that tallies events by person.
pub struct PersonAggregator;

impl PersonAggregator {
    /// Count messages sent and received by every address in `events`.
    ///
    /// Each event adds one to its sender's `sent`, and one to `received` for
    /// every occurrence of an address in its recipient list (an address
    /// listed twice is counted twice).
    pub fn tally(events: &[Event]) -> BTreeMap<String, PersonCounts> {
        let mut counts: BTreeMap<String, PersonCounts> = BTreeMap::new();

        for event in events {
            counts.entry(event.sender.clone()).or_default().sent += 1;
            for recipient in &event.recipients {
                counts.entry(recipient.clone()).or_default().received += 1;
            }
        }

        counts
    }

    /// One [`PersonSummary`] per address, sorted by `sent` descending.
    ///
    /// Ordering among persons with equal `sent` is not part of the contract.
    /// Currently ties come out in ascending address order, since the sort is
    /// stable over an address-ordered map.
    pub fn summarize(events: &[Event]) -> Vec<PersonSummary> {
        let mut summary: Vec<PersonSummary> = Self::tally(events)
            .into_iter()
            .map(|(person, counts)| PersonSummary {
                person,
                sent: counts.sent,
                received: counts.received,
            })
            .collect();

        summary.sort_by(|a, b| b.sent.cmp(&a.sent));

        debug!(
            "Summarized {} events into {} persons",
            events.len(),
            summary.len()
        );
        summary
    }

    /// The first `n` persons of a summary already sorted by `sent` descending.
    ///
    /// Returns everyone when fewer than `n` persons exist.
    pub fn top_senders(summary: &[PersonSummary], n: usize) -> Vec<String> {
        summary.iter().take(n).map(|p| p.person.clone()).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
