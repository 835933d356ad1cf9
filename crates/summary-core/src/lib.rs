//! Core types for the email event summary.
//!
//! Holds the event and summary models, quarter bucketing, timezone handling,
//! CLI settings and the shared error type. The aggregation itself lives in
//! `summary-data`; chart rendering in `summary-charts`.

pub mod error;
pub mod formatting;
pub mod models;
pub mod paths;
pub mod quarters;
pub mod settings;
pub mod time_utils;

pub use error::{Result, SummaryError};
