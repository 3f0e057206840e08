//! Data models for the fine analyzer.
//!
//! This module contains all the core data structures used throughout
//! the application for representing fine records, derived statistics,
//! and the structured analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five section labels the model is asked to produce, in order.
pub const SECTION_LABELS: [&str; 5] = [
    "Pattern Analysis",
    "Personalized Safety Tips",
    "Educational Information",
    "Potential Financial Savings",
    "Recommended Behavioral Changes",
];

/// A single reported traffic fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineRecord {
    /// Date the fine was issued (free-form, passed through to the prompt).
    pub date: String,
    /// Violation category, open vocabulary (e.g. "Speeding").
    #[serde(rename = "type")]
    pub category: String,
    /// Amount of the fine.
    pub amount: f64,
    /// Where the violation occurred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-text description of the violation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The input document: a fine history to analyze.
///
/// Unknown fields in the input JSON are ignored at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineHistory {
    /// The reported fines, in the order they were supplied.
    pub fines: Vec<FineRecord>,
}

/// Occurrence count for one violation category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTypeCount {
    /// The violation category.
    pub category: String,
    /// How many fines carried this category.
    pub count: usize,
}

/// Statistics derived from a fine history.
///
/// Computed once per analysis run and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineStatistics {
    /// Total number of fines.
    pub total_fines: usize,
    /// Sum of all fine amounts.
    pub total_amount: f64,
    /// Categories ranked by occurrence count, descending. Ties keep the
    /// order in which the categories first appeared in the history.
    pub fine_types: Vec<FineTypeCount>,
    /// The category with the highest occurrence count.
    pub most_common_fine: String,
}

/// Whether the analysis sections came from the live model or were
/// synthesized locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Sections were extracted from a live model response.
    Live,
    /// Sections were synthesized from statistics alone.
    Fallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Live => write!(f, "live"),
            Provenance::Fallback => write!(f, "fallback"),
        }
    }
}

/// The five analysis sections, one field per label in [`SECTION_LABELS`].
///
/// Every field is serialized even when absent, so consumers always see
/// all five keys. A `None` means the model's response had no
/// recognizable heading for that label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSections {
    pub pattern_analysis: Option<String>,
    pub safety_tips: Option<String>,
    pub educational_info: Option<String>,
    pub financial_savings: Option<String>,
    pub behavioral_changes: Option<String>,
}

impl AnalysisSections {
    /// Build from section bodies in [`SECTION_LABELS`] order.
    pub fn from_bodies(bodies: Vec<Option<String>>) -> Self {
        debug_assert_eq!(bodies.len(), SECTION_LABELS.len());

        let mut bodies = bodies.into_iter();
        Self {
            pattern_analysis: bodies.next().flatten(),
            safety_tips: bodies.next().flatten(),
            educational_info: bodies.next().flatten(),
            financial_savings: bodies.next().flatten(),
            behavioral_changes: bodies.next().flatten(),
        }
    }

    /// The section bodies paired with their labels, in label order.
    pub fn in_label_order(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (SECTION_LABELS[0], self.pattern_analysis.as_deref()),
            (SECTION_LABELS[1], self.safety_tips.as_deref()),
            (SECTION_LABELS[2], self.educational_info.as_deref()),
            (SECTION_LABELS[3], self.financial_savings.as_deref()),
            (SECTION_LABELS[4], self.behavioral_changes.as_deref()),
        ]
    }

    /// Number of populated sections.
    pub fn populated_count(&self) -> usize {
        self.in_label_order()
            .iter()
            .filter(|(_, body)| body.is_some())
            .count()
    }

    /// True when no section was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0
    }
}

/// The terminal output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineAnalysis {
    /// Statistics computed from the fine history.
    pub statistics: FineStatistics,
    /// The five labeled sections.
    pub analysis: AnalysisSections,
    /// The raw model response, or the composed document for a
    /// synthesized analysis.
    pub full_analysis: String,
    /// Where the sections came from.
    pub provenance: Provenance,
}

/// Metadata about the generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Name of the model the analysis was requested from.
    pub model_used: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Duration of the analysis in seconds.
    pub duration_seconds: f64,
}

/// The complete report written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// The analysis record, flattened to keep the original wire shape.
    #[serde(flatten)]
    pub result: FineAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_record_accepts_original_wire_shape() {
        let json = r#"{
            "date": "2025-01-12",
            "type": "Speeding",
            "amount": 500.0,
            "plate_number": "A 12345"
        }"#;

        let record: FineRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "Speeding");
        assert_eq!(record.amount, 500.0);
        assert!(record.location.is_none());
    }

    #[test]
    fn test_sections_serialize_all_five_keys() {
        let sections = AnalysisSections {
            pattern_analysis: Some("Mostly speeding.".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&sections).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert!(object["safety_tips"].is_null());
        assert_eq!(object["pattern_analysis"], "Mostly speeding.");
    }

    #[test]
    fn test_sections_populated_count() {
        let mut sections = AnalysisSections::default();
        assert!(sections.is_empty());

        sections.educational_info = Some("Speeding is dangerous.".to_string());
        sections.behavioral_changes = Some("Slow down.".to_string());
        assert_eq!(sections.populated_count(), 2);
        assert!(!sections.is_empty());
    }

    #[test]
    fn test_from_bodies_keeps_label_order() {
        let bodies = vec![
            Some("patterns".to_string()),
            None,
            Some("education".to_string()),
            None,
            Some("changes".to_string()),
        ];

        let sections = AnalysisSections::from_bodies(bodies);
        assert_eq!(sections.pattern_analysis.as_deref(), Some("patterns"));
        assert!(sections.safety_tips.is_none());
        assert_eq!(sections.educational_info.as_deref(), Some("education"));
        assert!(sections.financial_savings.is_none());
        assert_eq!(sections.behavioral_changes.as_deref(), Some("changes"));
    }

    #[test]
    fn test_provenance_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Provenance::Fallback).unwrap(),
            "\"fallback\""
        );
        assert_eq!(Provenance::Live.to_string(), "live");
    }
}
