//! Market report records returned by the query pipeline.
//!
//! Wire names are camelCase, matching the structure the generation service
//! is asked to produce. Incoming records deserialize leniently (see
//! [`crate::lenient`]); price fields stay display strings and are only
//! interpreted by [`crate::currency`].

use serde::{Deserialize, Serialize};

use crate::lenient;

/// A seasonal produce item worth buying right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduceDeal {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Display string such as `"$1.20/kg"`; not guaranteed to be numeric.
    #[serde(default, deserialize_with = "lenient::string")]
    pub price_estimate: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub seasonality: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reason: String,
}

impl ProduceDeal {
    /// Whether the seasonality label reads as in season (e.g. `"In-Season"`).
    #[must_use]
    pub fn is_in_season(&self) -> bool {
        let lower = self.seasonality.to_lowercase();
        lower.contains("in") && !lower.contains("out")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoreCategory {
    Supermarket,
    LocalMarket,
    DiscountStore,
    /// A label outside the three expected categories, kept verbatim.
    Other(String),
}

impl Default for StoreCategory {
    fn default() -> Self {
        StoreCategory::Other(String::new())
    }
}

impl From<String> for StoreCategory {
    fn from(raw: String) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "supermarket" => StoreCategory::Supermarket,
            "localmarket" => StoreCategory::LocalMarket,
            "discountstore" => StoreCategory::DiscountStore,
            _ => StoreCategory::Other(raw),
        }
    }
}

impl From<StoreCategory> for String {
    fn from(category: StoreCategory) -> Self {
        match category {
            StoreCategory::Other(raw) => raw,
            known => known.to_string(),
        }
    }
}

impl std::fmt::Display for StoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreCategory::Supermarket => write!(f, "Supermarket"),
            StoreCategory::LocalMarket => write!(f, "Local Market"),
            StoreCategory::DiscountStore => write!(f, "Discount Store"),
            StoreCategory::Other(raw) => write!(f, "{raw}"),
        }
    }
}

fn category<'de, D>(deserializer: D) -> Result<StoreCategory, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient::string(deserializer).map(StoreCategory::from)
}

/// A recommended store for the selected city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProfile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "category")]
    pub category: StoreCategory,
    #[serde(default, deserialize_with = "lenient::string")]
    pub highlights: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub accessibility: String,
}

/// One priced item of the user's shopping list at one store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingLineItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub item_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: String,
}

/// Shopping-list cost breakdown for one store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreComparison {
    #[serde(default, deserialize_with = "lenient::string")]
    pub store_name: String,
    #[serde(default, deserialize_with = "lenient::records")]
    pub items: Vec<ShoppingLineItem>,
    /// Display string such as `"$15.50"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub total_cost: String,
    /// Recomputed by [`crate::rank_comparisons`]; a value supplied by the
    /// service is never trusted.
    #[serde(default, deserialize_with = "lenient::bool")]
    pub is_lowest_price: bool,
    /// Parsed `total_cost`, present only when it parsed.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub total_numeric: Option<f64>,
}

/// A citation backing the generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Rendered search-suggestion markup supplied by the generation service.
///
/// Third-party HTML: never parsed here, and only to be rendered verbatim
/// inside a sandboxed container owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchAffordance(String);

impl SearchAffordance {
    #[must_use]
    pub fn new(markup: String) -> Self {
        Self(markup)
    }

    /// The raw, untrusted markup.
    #[must_use]
    pub fn untrusted_html(&self) -> &str {
        &self.0
    }
}

/// The complete result of one market query.
///
/// Only built by a successful pipeline run, so `summary`, `produce` and
/// `stores` were all present in the service payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub summary: String,
    pub produce: Vec<ProduceDeal>,
    pub stores: Vec<StoreProfile>,
    pub sources: Vec<GroundingSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_affordance: Option<SearchAffordance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopping_comparison: Option<Vec<StoreComparison>>,
}

impl QueryResult {
    /// The store flagged as cheapest for the shopping list, if any.
    #[must_use]
    pub fn lowest_price_store(&self) -> Option<&StoreComparison> {
        self.shopping_comparison
            .as_deref()
            .and_then(|comparisons| comparisons.iter().find(|c| c.is_lowest_price))
    }
}
