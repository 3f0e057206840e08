//! Analysis pipeline: aggregation, prompting, and orchestration.

pub mod aggregator;
pub mod orchestrator;
pub mod prompt;

use thiserror::Error;

/// Errors that end the current analysis run.
///
/// Upstream failures are deliberately not represented here; they are
/// absorbed by the orchestrator's fallback path and never surfaced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The fine history was empty; there is nothing to analyze.
    #[error("no fine history provided")]
    EmptyHistory,
}

pub use aggregator::aggregate;
pub use orchestrator::{run_analysis, run_offline};
