//! Prompt construction for the upstream model.

use crate::models::{FineRecord, FineStatistics};

/// System prompt sent with every analysis request.
pub const SYSTEM_PROMPT: &str = "You are Salama AI Assistant, a helpful traffic safety advisor \
that analyzes fine history and provides personalized advice to improve driving behavior and \
reduce fines.";

/// Render the numbered fine history block.
fn fine_history_text(fines: &[FineRecord]) -> String {
    let mut text = String::from("Fine History:\n");

    for (i, fine) in fines.iter().enumerate() {
        text.push_str(&format!(
            "{}. Date: {}, Type: {}, Amount: {}",
            i + 1,
            fine.date,
            fine.category,
            fine.amount
        ));
        if let Some(location) = &fine.location {
            text.push_str(&format!(", Location: {location}"));
        }
        if let Some(description) = &fine.description {
            text.push_str(&format!(", Description: {description}"));
        }
        text.push('\n');
    }

    text
}

/// Build the user prompt from the history and its statistics.
///
/// The closing instruction asks for headed sections; the extractor
/// depends on the model honoring it.
pub fn build_prompt(fines: &[FineRecord], stats: &FineStatistics) -> String {
    format!(
        "As the Salama AI Assistant, analyze the following traffic fine history and provide \
         personalized safety advice:\n\
         \n\
         {}\
         \n\
         Statistics:\n\
         - Total number of fines: {}\n\
         - Total amount paid: {}\n\
         - Most common fine type: {}\n\
         \n\
         Based on this history, please provide:\n\
         1. A pattern analysis of the user's traffic violations\n\
         2. Personalized safety tips to avoid future fines\n\
         3. Educational information about the most common violation\n\
         4. Potential financial savings if these behaviors are corrected\n\
         5. Specific behavioral changes recommended\n\
         \n\
         Format your response in clear sections with headings.\n",
        fine_history_text(fines),
        stats.total_fines,
        stats.total_amount,
        stats.most_common_fine
    )
}
