//! Quarterly activity of the top senders.
//!
//! Both series share one bucket range: every quarter from the one holding the
//! earliest event of the whole log to the one holding the latest. Counts are
//! gathered sparsely, then reindexed against that range so every
//! bucket × person cell exists.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use summary_core::models::{Event, QuarterlyTable, SeriesKind};
use summary_core::quarters::QuarterBucket;
use tracing::debug;

// ── ContactEvent ──────────────────────────────────────────────────────────────

/// An event re-addressed to a single top sender it was delivered to.
///
/// Derived copy used by the unique-contacts series; the recipient list of
/// the original event is dropped, only membership matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEvent<'a> {
    pub timestamp: NaiveDateTime,
    pub sender: &'a str,
    pub target: &'a str,
}

// ── QuarterlyAggregator ───────────────────────────────────────────────────────

/// Stateless helper that builds the dense per-quarter tables.
pub struct QuarterlyAggregator;

impl QuarterlyAggregator {
    /// Contiguous quarters spanning every event in `events`.
    pub fn bucket_range(events: &[Event]) -> Vec<QuarterBucket> {
        QuarterBucket::covering(events.iter().map(|e| e.timestamp))
    }

    /// Messages sent per quarter by each of `top_senders`.
    pub fn sent_volume(events: &[Event], top_senders: &[String]) -> QuarterlyTable {
        let mut observed: HashMap<(QuarterBucket, &str), u64> = HashMap::new();

        for event in events
            .iter()
            .filter(|e| top_senders.contains(&e.sender))
        {
            *observed
                .entry((event.quarter(), event.sender.as_str()))
                .or_insert(0) += 1;
        }

        debug!(
            "Sent-volume series: {} non-empty cells for {} senders",
            observed.len(),
            top_senders.len()
        );

        QuarterlyTable::from_fn(
            SeriesKind::SentVolume,
            Self::bucket_range(events),
            top_senders.to_vec(),
            |bucket, person| observed.get(&(bucket, person)).copied().unwrap_or(0),
        )
    }

    /// Events delivered to each top sender, re-addressed to that sender.
    ///
    /// An event addressed to several top senders yields one record per
    /// top sender. Input events are left untouched.
    pub fn contact_events<'a>(
        events: &'a [Event],
        top_senders: &'a [String],
    ) -> Vec<ContactEvent<'a>> {
        top_senders
            .iter()
            .flat_map(move |target| {
                events
                    .iter()
                    .filter(move |e| e.is_addressed_to(target))
                    .map(move |e| ContactEvent {
                        timestamp: e.timestamp,
                        sender: e.sender.as_str(),
                        target: target.as_str(),
                    })
            })
            .collect()
    }

    /// Distinct senders per quarter who wrote to each of `top_senders`.
    ///
    /// Distinctness is per bucket, not cumulative.
    pub fn unique_contacts(events: &[Event], top_senders: &[String]) -> QuarterlyTable {
        let mut observed: HashMap<(QuarterBucket, &str), HashSet<&str>> = HashMap::new();

        for contact in Self::contact_events(events, top_senders) {
            observed
                .entry((QuarterBucket::containing(contact.timestamp), contact.target))
                .or_default()
                .insert(contact.sender);
        }

        debug!(
            "Unique-contacts series: {} non-empty cells for {} senders",
            observed.len(),
            top_senders.len()
        );

        QuarterlyTable::from_fn(
            SeriesKind::UniqueContacts,
            Self::bucket_range(events),
            top_senders.to_vec(),
            |bucket, person| {
                observed
                    .get(&(bucket, person))
                    .map(|senders| senders.len() as u64)
                    .unwrap_or(0)
            },
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
