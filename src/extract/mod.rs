//! Marker-based section extraction.
//!
//! Locates labeled sections in free-form model output. Each label's
//! heading may appear in one of three styles, tried in precedence order:
//! `## Label`, `**Label**`, or the bare label text. A label with no
//! recognizable heading yields `None` for that section; extraction never
//! fails as a whole.

/// Heading styles for one label, in precedence order.
fn heading_patterns(label: &str) -> [String; 3] {
    [
        format!("## {label}"),
        format!("**{label}**"),
        label.to_string(),
    ]
}

/// Find the heading for `label` at or after byte offset `from`.
///
/// Styles are tried one at a time over the whole remaining text, so a
/// `## Label` occurrence late in the document still wins over a bare
/// `Label` occurrence before it.
fn find_heading(text: &str, from: usize, label: &str) -> Option<usize> {
    let tail = &text[from..];
    heading_patterns(label)
        .iter()
        .find_map(|pattern| tail.find(pattern.as_str()).map(|i| from + i))
}

/// Split `text` into one body per label, in the caller-supplied order.
///
/// A section body starts on the line after its heading and ends right
/// before the next label's heading, or at end-of-text for the last label
/// or when no later heading is found. Bodies are trimmed.
///
/// The search cursor only moves forward: once a label's heading is
/// located, the next label is searched from that section's body onward.
/// Headings that appear out of the supplied order are therefore skipped
/// rather than reordered.
pub fn extract_sections<'a>(text: &str, labels: &[&'a str]) -> Vec<(&'a str, Option<String>)> {
    let mut sections = Vec::with_capacity(labels.len());
    let mut cursor = 0;

    for (idx, label) in labels.iter().enumerate() {
        let Some(heading) = find_heading(text, cursor, label) else {
            sections.push((*label, None));
            continue;
        };

        // The body starts on the line after the heading. A heading with
        // nothing after it on any line has no body.
        let Some(newline) = text[heading..].find('\n') else {
            sections.push((*label, None));
            cursor = heading;
            continue;
        };
        let body_start = heading + newline + 1;

        let body_end = labels
            .get(idx + 1)
            .and_then(|next| find_heading(text, body_start, next))
            .unwrap_or(text.len());

        sections.push((*label, Some(text[body_start..body_end].trim().to_string())));
        cursor = body_start;
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sections_with_hash_headings() {
        let text = "## Pattern Analysis\nFoo bar\n## Personalized Safety Tips\nBaz";
        let labels = ["Pattern Analysis", "Personalized Safety Tips"];

        let sections = extract_sections(text, &labels);

        assert_eq!(
            sections,
            vec![
                ("Pattern Analysis", Some("Foo bar".to_string())),
                ("Personalized Safety Tips", Some("Baz".to_string())),
            ]
        );
    }

    #[test]
    fn test_bold_heading_style() {
        let text = "**Pattern Analysis**\nYou speed a lot.\n**Safety Tips**\nSlow down.";
        let sections = extract_sections(text, &["Pattern Analysis", "Safety Tips"]);

        assert_eq!(sections[0].1.as_deref(), Some("You speed a lot."));
        assert_eq!(sections[1].1.as_deref(), Some("Slow down."));
    }

    #[test]
    fn test_bare_heading_style() {
        let text = "Pattern Analysis\nplain text heading\nSafety Tips\nstill works";
        let sections = extract_sections(text, &["Pattern Analysis", "Safety Tips"]);

        assert_eq!(sections[0].1.as_deref(), Some("plain text heading"));
        assert_eq!(sections[1].1.as_deref(), Some("still works"));
    }

    #[test]
    fn test_hash_style_wins_over_earlier_bare_occurrence() {
        // The bare label appears first, but the ## heading later in the
        // document takes precedence.
        let text = "We discuss Pattern Analysis below.\n## Pattern Analysis\nActual body";
        let sections = extract_sections(text, &["Pattern Analysis"]);

        assert_eq!(sections[0].1.as_deref(), Some("Actual body"));
    }

    #[test]
    fn test_missing_label_yields_none_only() {
        let text = "## Pattern Analysis\nFoo\n## Personalized Safety Tips\nBar";
        let labels = [
            "Pattern Analysis",
            "Personalized Safety Tips",
            "Educational Information",
        ];

        let sections = extract_sections(text, &labels);

        assert!(sections[0].1.is_some());
        assert!(sections[1].1.is_some());
        assert_eq!(sections[2], ("Educational Information", None));
    }

    #[test]
    fn test_unrecognized_format_yields_all_none() {
        let text = "The model decided to answer in one big paragraph instead.";
        let sections = extract_sections(text, &["Pattern Analysis", "Safety Tips"]);

        assert!(sections.iter().all(|(_, body)| body.is_none()));
    }

    #[test]
    fn test_heading_without_newline_is_not_found() {
        let sections = extract_sections("## Pattern Analysis", &["Pattern Analysis"]);
        assert_eq!(sections[0].1, None);
    }

    #[test]
    fn test_last_section_runs_to_end_of_text() {
        let text = "## Pattern Analysis\nline one\nline two\n";
        let sections = extract_sections(text, &["Pattern Analysis"]);

        assert_eq!(sections[0].1.as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn test_bodies_are_trimmed() {
        let text = "## Pattern Analysis\n\n   padded body   \n\n## Safety Tips\nnext";
        let sections = extract_sections(text, &["Pattern Analysis", "Safety Tips"]);

        assert_eq!(sections[0].1.as_deref(), Some("padded body"));
    }

    // Pins the forward-only cursor behavior: when the model emits the
    // second label's heading before the first, the first label captures
    // everything from its own heading onward and the second is skipped.
    #[test]
    fn test_reordered_headings_follow_document_order() {
        let text = "## Personalized Safety Tips\nTips body\n## Pattern Analysis\nPatterns body";
        let labels = ["Pattern Analysis", "Personalized Safety Tips"];

        let sections = extract_sections(text, &labels);

        assert_eq!(sections[0].1.as_deref(), Some("Patterns body"));
        assert_eq!(sections[1].1, None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "## Pattern Analysis\nFoo\n**Safety Tips**\nBar";
        let labels = ["Pattern Analysis", "Safety Tips"];

        let first = extract_sections(text, &labels);
        let second = extract_sections(text, &labels);

        assert_eq!(first, second);
    }
}
