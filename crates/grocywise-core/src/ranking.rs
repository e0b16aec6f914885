//! Lowest-cost store selection for shopping-list comparisons.

use crate::currency::parse_amount;
use crate::report::StoreComparison;

/// Recomputes `total_numeric` and `is_lowest_price` for every entry.
///
/// Exactly one entry is flagged: the first (in input order) whose parsed
/// total is minimal among entries that parsed. When no total parses, none
/// is flagged. Flags supplied by the generation service are overwritten.
#[must_use]
pub fn rank_comparisons(comparisons: Vec<StoreComparison>) -> Vec<StoreComparison> {
    let mut ranked: Vec<StoreComparison> = comparisons
        .into_iter()
        .map(|mut comparison| {
            comparison.total_numeric = parse_amount(&comparison.total_cost);
            comparison.is_lowest_price = false;
            comparison
        })
        .collect();

    if let Some(idx) = lowest_index(&ranked) {
        ranked[idx].is_lowest_price = true;
    }

    ranked
}

/// Index of the first entry with the minimal parsed total.
///
/// Uses `total_numeric` when set, otherwise parses `total_cost`.
#[must_use]
pub fn lowest_index(comparisons: &[StoreComparison]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, comparison) in comparisons.iter().enumerate() {
        let Some(total) = comparison
            .total_numeric
            .or_else(|| parse_amount(&comparison.total_cost))
        else {
            continue;
        };

        // Strict comparison keeps the earliest entry on ties.
        match best {
            Some((_, current)) if total >= current => {}
            _ => best = Some((idx, total)),
        }
    }

    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(store: &str, total: &str, flagged: bool) -> StoreComparison {
        StoreComparison {
            store_name: store.to_string(),
            items: vec![],
            total_cost: total.to_string(),
            is_lowest_price: flagged,
            total_numeric: None,
        }
    }

    fn flags(ranked: &[StoreComparison]) -> Vec<bool> {
        ranked.iter().map(|c| c.is_lowest_price).collect()
    }

    #[test]
    fn ties_flag_first_occurrence_only() {
        let ranked = rank_comparisons(vec![
            comparison("A", "$15.50", false),
            comparison("B", "$12.00", false),
            comparison("C", "$12.00", false),
        ]);
        assert_eq!(flags(&ranked), vec![false, true, false]);
        assert_eq!(ranked[1].total_numeric, Some(12.0));
    }

    #[test]
    fn unparseable_totals_flag_nothing() {
        let ranked = rank_comparisons(vec![
            comparison("A", "N/A", false),
            comparison("B", "TBD", true),
        ]);
        assert_eq!(flags(&ranked), vec![false, false]);
        assert!(ranked.iter().all(|c| c.total_numeric.is_none()));
    }

    #[test]
    fn unparseable_entries_never_count_as_zero() {
        let ranked = rank_comparisons(vec![
            comparison("A", "unknown", false),
            comparison("B", "$30.10", false),
            comparison("C", "$25.00", false),
        ]);
        assert_eq!(flags(&ranked), vec![false, false, true]);
    }

    #[test]
    fn service_flags_are_overridden() {
        let ranked = rank_comparisons(vec![
            comparison("A", "$40.00", true),
            comparison("B", "$35.00", true),
        ]);
        assert_eq!(flags(&ranked), vec![false, true]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(rank_comparisons(vec![]).is_empty());
        assert_eq!(lowest_index(&[]), None);
    }

    #[test]
    fn ranking_is_deterministic() {
        let input = vec![
            comparison("A", "$9.99", false),
            comparison("B", "$9.99", true),
            comparison("C", "free", false),
        ];
        assert_eq!(rank_comparisons(input.clone()), rank_comparisons(input));
    }

    #[test]
    fn at_most_one_flag_for_many_entries() {
        let input: Vec<_> = ["$3", "$1", "$2", "$1", "n/a", "$1"]
            .iter()
            .enumerate()
            .map(|(i, total)| comparison(&format!("S{i}"), total, true))
            .collect();
        let ranked = rank_comparisons(input);
        assert_eq!(ranked.iter().filter(|c| c.is_lowest_price).count(), 1);
        assert!(ranked[1].is_lowest_price);
    }
}
