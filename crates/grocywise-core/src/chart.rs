//! Chart-ready numeric series for the basket price comparison.

use serde::Serialize;

use crate::currency::parse_amount;
use crate::report::StoreComparison;

/// One bar of the basket comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    /// Parsed total; `None` when the display string did not parse.
    pub total: Option<f64>,
    /// The original display string, shown as the bar label.
    pub label: String,
    pub is_lowest: bool,
}

/// Builds one chart point per store, in input order.
///
/// Expects comparisons that went through [`crate::rank_comparisons`] so
/// `is_lowest` reflects the recomputed flag.
#[must_use]
pub fn chart_series(comparisons: &[StoreComparison]) -> Vec<ChartPoint> {
    comparisons
        .iter()
        .map(|c| ChartPoint {
            name: c.store_name.clone(),
            total: c.total_numeric.or_else(|| parse_amount(&c.total_cost)),
            label: c.total_cost.clone(),
            is_lowest: c.is_lowest_price,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::rank_comparisons;

    #[test]
    fn series_follows_input_order_and_flags() {
        let ranked = rank_comparisons(vec![
            StoreComparison {
                store_name: "Metro".to_string(),
                total_cost: "$21.40".to_string(),
                ..StoreComparison::default()
            },
            StoreComparison {
                store_name: "FreshCo".to_string(),
                total_cost: "$18.95".to_string(),
                ..StoreComparison::default()
            },
        ]);

        let series = chart_series(&ranked);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Metro");
        assert_eq!(series[0].total, Some(21.4));
        assert!(!series[0].is_lowest);
        assert_eq!(series[1].label, "$18.95");
        assert!(series[1].is_lowest);
    }

    #[test]
    fn unparseable_total_has_no_value() {
        let series = chart_series(&[StoreComparison {
            store_name: "Corner Shop".to_string(),
            total_cost: "ask in store".to_string(),
            ..StoreComparison::default()
        }]);
        assert_eq!(series[0].total, None);
        assert_eq!(series[0].label, "ask in store");
    }
}
