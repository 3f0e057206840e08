//! Fine history aggregation.
//!
//! Computes the record count, amount total, and category frequency
//! ranking over a fine history in a single pass.

use crate::analysis::AnalysisError;
use crate::models::{FineRecord, FineStatistics, FineTypeCount};

/// Aggregate a fine history into [`FineStatistics`].
///
/// Fails with [`AnalysisError::EmptyHistory`] on an empty history; every
/// later stage of the pipeline assumes at least one record exists.
pub fn aggregate(fines: &[FineRecord]) -> Result<FineStatistics, AnalysisError> {
    if fines.is_empty() {
        return Err(AnalysisError::EmptyHistory);
    }

    let mut total_amount = 0.0;
    // Insertion order is preserved so ties rank by first appearance.
    let mut fine_types: Vec<FineTypeCount> = Vec::new();

    for fine in fines {
        total_amount += fine.amount;

        match fine_types.iter_mut().find(|t| t.category == fine.category) {
            Some(entry) => entry.count += 1,
            None => fine_types.push(FineTypeCount {
                category: fine.category.clone(),
                count: 1,
            }),
        }
    }

    // Stable sort: equal counts keep their first-seen order.
    fine_types.sort_by(|a, b| b.count.cmp(&a.count));

    let most_common_fine = fine_types[0].category.clone();

    Ok(FineStatistics {
        total_fines: fines.len(),
        total_amount,
        fine_types,
        most_common_fine,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fine(category: &str, amount: f64) -> FineRecord {
        FineRecord {
            date: "2025-01-01".to_string(),
            category: category.to_string(),
            amount,
            location: None,
            description: None,
        }
    }

    #[test]
    fn test_empty_history_is_an_error() {
        assert_eq!(aggregate(&[]), Err(AnalysisError::EmptyHistory));
    }

    #[test]
    fn test_totals() {
        let fines = vec![fine("Speeding", 500.0), fine("Speeding", 300.0)];
        let stats = aggregate(&fines).unwrap();

        assert_eq!(stats.total_fines, 2);
        assert_eq!(stats.total_amount, 800.0);
        assert_eq!(stats.most_common_fine, "Speeding");
    }

    #[test]
    fn test_category_counts_sum_to_total() {
        let fines = vec![
            fine("Speeding", 500.0),
            fine("Illegal Parking", 150.0),
            fine("Speeding", 300.0),
            fine("Red Light", 1000.0),
        ];
        let stats = aggregate(&fines).unwrap();

        let counted: usize = stats.fine_types.iter().map(|t| t.count).sum();
        assert_eq!(counted, stats.total_fines);
    }

    #[test]
    fn test_ranking_is_by_count_descending() {
        let fines = vec![
            fine("Illegal Parking", 150.0),
            fine("Speeding", 500.0),
            fine("Speeding", 300.0),
        ];
        let stats = aggregate(&fines).unwrap();

        assert_eq!(stats.fine_types[0].category, "Speeding");
        assert_eq!(stats.fine_types[0].count, 2);
        assert_eq!(stats.fine_types[1].category, "Illegal Parking");
    }

    #[test]
    fn test_ties_rank_by_first_seen_order() {
        // Two of each, Speeding first in the input.
        let fines = vec![
            fine("Speeding", 500.0),
            fine("Parking", 150.0),
            fine("Speeding", 300.0),
            fine("Parking", 150.0),
        ];
        let stats = aggregate(&fines).unwrap();

        assert_eq!(stats.most_common_fine, "Speeding");
        assert_eq!(stats.fine_types[0].category, "Speeding");
        assert_eq!(stats.fine_types[1].category, "Parking");
    }

    #[test]
    fn test_single_record_history() {
        let stats = aggregate(&[fine("Seatbelt", 0.0)]).unwrap();

        assert_eq!(stats.total_fines, 1);
        assert_eq!(stats.total_amount, 0.0);
        assert_eq!(stats.most_common_fine, "Seatbelt");
    }
}
