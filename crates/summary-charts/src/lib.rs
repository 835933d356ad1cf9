//! Chart rendering for the email summary.
//!
//! Draws the two quarterly series produced by `summary-data` to PNG files:
//! a line chart of messages sent and a stacked bar chart of distinct
//! incoming contacts.

pub mod charts;

pub use charts::{draw_sent_volume_chart, draw_unique_contacts_chart};
