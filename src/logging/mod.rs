//! Structured logging setup and one-line stage summaries.

mod format;

pub use format::{StageSummary, StructuredLogger};
