//! Markdown and JSON report generation.
//!
//! This module renders the finished analysis record into the report
//! written to disk.

use crate::config::ReportConfig;
use crate::models::{AnalysisSections, FineStatistics, Provenance, Report, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, config: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Salama Traffic Fine Analysis\n\n");

    // Metadata section
    output.push_str(&generate_metadata_section(
        &report.metadata,
        report.result.provenance,
    ));

    // Statistics section
    output.push_str(&generate_statistics_section(
        &report.result.statistics,
        config,
    ));

    // The five analysis sections
    output.push_str(&generate_analysis_sections(&report.result.analysis));

    // Raw model response
    if config.include_full_analysis {
        output.push_str(&generate_full_analysis_section(&report.result.full_analysis));
    }

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata, provenance: Provenance) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Model:** `{}`\n", metadata.model_used));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Source:** {}\n", provenance));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    if provenance == Provenance::Fallback {
        section.push_str(
            "> **Note:** the model was unavailable, so this analysis was \
             generated locally from your fine statistics.\n\n",
        );
    }

    section
}

/// Generate the statistics section.
fn generate_statistics_section(stats: &FineStatistics, config: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## Statistics\n\n");
    section.push_str(&format!("- **Total fines:** {}\n", stats.total_fines));
    section.push_str(&format!("- **Total amount:** {}\n", stats.total_amount));
    section.push_str(&format!(
        "- **Most common violation:** {}\n\n",
        stats.most_common_fine
    ));

    if config.include_fine_types && !stats.fine_types.is_empty() {
        section.push_str("| Violation | Count |\n");
        section.push_str("|:---|:---:|\n");

        for entry in &stats.fine_types {
            section.push_str(&format!("| {} | {} |\n", entry.category, entry.count));
        }
        section.push('\n');
    }

    section
}

/// Generate the five analysis sections.
fn generate_analysis_sections(sections: &AnalysisSections) -> String {
    let mut output = String::new();

    for (label, body) in sections.in_label_order() {
        output.push_str(&format!("## {}\n\n", label));
        match body {
            Some(body) => output.push_str(body),
            None => output.push_str("_Not provided by the model._"),
        }
        output.push_str("\n\n");
    }

    output
}

/// Generate the raw model response section.
fn generate_full_analysis_section(full_analysis: &str) -> String {
    let mut section = String::new();

    section.push_str("## Full Analysis Text\n\n");
    section.push_str("<details>\n<summary>View the unprocessed analysis</summary>\n\n");
    section.push_str(full_analysis);
    section.push_str("\n\n</details>\n\n");

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by Salama*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
