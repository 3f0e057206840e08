//! Analysis orchestration.
//!
//! Runs the full pipeline for one request: aggregate statistics, ask the
//! upstream model, extract sections from its answer, and fall back to
//! local synthesis whenever the model or its output is unusable. The
//! returned record always carries all five section keys and a provenance
//! flag; upstream trouble is never surfaced as an error.

use crate::analysis::{aggregate, prompt, AnalysisError};
use crate::extract::extract_sections;
use crate::fallback;
use crate::models::{
    AnalysisSections, FineAnalysis, FineRecord, FineStatistics, Provenance, SECTION_LABELS,
};
use crate::upstream::ModelClient;
use tracing::{info, warn};

/// Analyze a fine history using the injected model client.
///
/// Fails only on an empty history. A failed upstream call, an empty
/// completion, or a response with no recognizable section all produce a
/// synthesized record instead, with no retry.
pub async fn run_analysis<C: ModelClient>(
    fines: &[FineRecord],
    client: &C,
) -> Result<FineAnalysis, AnalysisError> {
    let statistics = aggregate(fines)?;
    let prompt = prompt::build_prompt(fines, &statistics);

    let text = match client.complete(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("Model returned an empty completion, synthesizing locally");
            return Ok(synthesized(statistics));
        }
        Err(e) => {
            warn!("Upstream call failed ({e}), synthesizing locally");
            return Ok(synthesized(statistics));
        }
    };

    let bodies = extract_sections(&text, &SECTION_LABELS)
        .into_iter()
        .map(|(_, body)| body)
        .collect();
    let analysis = AnalysisSections::from_bodies(bodies);

    // A record with five nulls would look broken to the caller, so an
    // unrecognized response format is treated like an upstream failure.
    if analysis.is_empty() {
        warn!("No recognizable sections in the model response, synthesizing locally");
        return Ok(synthesized(statistics));
    }

    info!(
        "Extracted {} of {} sections from the model response",
        analysis.populated_count(),
        SECTION_LABELS.len()
    );

    Ok(FineAnalysis {
        statistics,
        analysis,
        full_analysis: text,
        provenance: Provenance::Live,
    })
}

/// Analyze a fine history without touching the model at all.
pub fn run_offline(fines: &[FineRecord]) -> Result<FineAnalysis, AnalysisError> {
    let statistics = aggregate(fines)?;
    Ok(synthesized(statistics))
}

fn synthesized(statistics: FineStatistics) -> FineAnalysis {
    let analysis = fallback::synthesize(&statistics);
    let full_analysis = fallback::compose_full_analysis(&statistics);

    FineAnalysis {
        statistics,
        analysis,
        full_analysis,
        provenance: Provenance::Fallback,
    }
}
