//! Deterministic fallback synthesis.
//!
//! When the model is unreachable, answers with an empty body, or uses a
//! heading format the extractor cannot recognize, these templates
//! produce the same five sections from statistics alone. Every function
//! here is a pure function of [`FineStatistics`]; synthesis cannot fail.

use crate::models::{AnalysisSections, FineStatistics};

/// Synthesize all five analysis sections from statistics.
pub fn synthesize(stats: &FineStatistics) -> AnalysisSections {
    AnalysisSections {
        pattern_analysis: Some(pattern_analysis(stats)),
        safety_tips: Some(safety_tips()),
        educational_info: Some(educational_info(stats)),
        financial_savings: Some(financial_savings(stats)),
        behavioral_changes: Some(behavioral_changes()),
    }
}

/// Render the synthesized sections as a single document with `##`
/// headings, matching the shape of a live model response.
pub fn compose_full_analysis(stats: &FineStatistics) -> String {
    let sections = synthesize(stats);
    let mut output = String::new();

    for (label, body) in sections.in_label_order() {
        output.push_str(&format!("## {}\n{}\n\n", label, body.unwrap_or_default()));
    }

    output.trim_end().to_string()
}

fn pattern_analysis(stats: &FineStatistics) -> String {
    format!(
        "Based on your {} traffic fines, your most common violation is '{}'.",
        stats.total_fines, stats.most_common_fine
    )
}

fn safety_tips() -> String {
    [
        "1. Always obey speed limits and traffic signs",
        "2. Maintain a safe distance from other vehicles",
        "3. Use turn signals when changing lanes",
        "4. Avoid using mobile phones while driving",
        "5. Always wear your seatbelt",
    ]
    .join("\n")
}

fn educational_info(stats: &FineStatistics) -> String {
    format!(
        "Traffic violations like '{}' not only result in fines but also \
         increase the risk of accidents and may affect your insurance premiums.",
        stats.most_common_fine
    )
}

fn financial_savings(stats: &FineStatistics) -> String {
    format!(
        "By avoiding these violations, you could save approximately {} per year in fines.",
        stats.total_amount
    )
}

fn behavioral_changes() -> String {
    [
        "1. Plan your trips with extra time to avoid rushing",
        "2. Set reminders about traffic rules",
        "3. Use navigation apps that alert you to speed limits",
        "4. Practice defensive driving techniques",
        "5. Consider taking a defensive driving course",
    ]
    .join("\n")
}
