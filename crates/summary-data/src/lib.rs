//! Data layer for the email event summary.
//!
//! Responsible for reading the event log, tallying per-person counts,
//! selecting the top senders, building the quarterly series and writing the
//! summary CSV.

pub mod aggregator;
pub mod analysis;
pub mod reader;
pub mod timeline;
pub mod writer;

pub use summary_core as core;
