//! Task prompt and system instruction construction.
//!
//! The prompt is deterministic: the same location, list and filters always
//! produce the same text, with filter labels in the order they were picked.

use grocywise_core::{FilterSet, LocationSelector};

use crate::schema::market_report_schema;

/// Number of best-value produce items requested.
pub const PRODUCE_COUNT: usize = 4;
/// Number of best-value stores requested.
pub const STORE_COUNT: usize = 3;
/// Phrase marking dietary restrictions as a hard constraint.
pub const HARD_CONSTRAINT_MARKER: &str = "must strictly adhere";

pub const SYSTEM_INSTRUCTION: &str = r#"You are a world-class global grocery price analyst.
Your goal is to help users find the most affordable items and compare store prices in a specific city and country.

If provided with a shopping list, research current local prices for those items (including quantities) at major supermarkets in that specific location. Use web search grounding to get real-time price approximations.

Provide the response in JSON format strictly following this structure:
{
  "summary": "Overview of findings.",
  "produce": [
    { "name": "Item", "priceEstimate": "$X", "seasonality": "Status", "reason": "Deal info" }
  ],
  "stores": [
    { "name": "Store", "category": "Supermarket | Local Market | Discount Store", "highlights": "Pros", "accessibility": "Location info" }
  ],
  "shoppingComparison": [
    {
      "storeName": "Store A",
      "items": [{ "itemName": "Apples 2kg", "price": "$4.00", "notes": "On sale" }],
      "totalCost": "$15.50",
      "isLowestPrice": true
    }
  ]
}

Only include "shoppingComparison" when a shopping list was provided.
Ensure the data is realistic for the city and country. Focus on major, accessible stores. Use local currency formatting."#;

/// The task prompt plus the structural contract for the reply.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRequest {
    pub task_prompt: String,
    pub output_schema: serde_json::Value,
}

/// Compose the task prompt and output schema for one query.
///
/// A blank `shopping_list` is treated as absent. Empty filter categories add
/// nothing to the prompt.
#[must_use]
pub fn build_request(
    location: &LocationSelector,
    shopping_list: Option<&str>,
    filters: Option<&FilterSet>,
) -> MarketRequest {
    let city = location.city();
    let country = location.country();

    let mut prompt = format!(
        "What are the most affordable produce items and major grocery stores in {city}, {country} right now? \
         Analyze current grocery prices, recent price trends and store availability. \
         Recommend the {PRODUCE_COUNT} best-value produce items and the {STORE_COUNT} best-value stores, \
         mixing large chains with popular local discount options."
    );

    let filters = filters.filter(|f| !f.is_empty());
    if let Some(filters) = filters {
        if !filters.food_groups().is_empty() {
            prompt.push_str(&format!(
                "\n\nWhere possible, focus on these food groups: {}.",
                filters.food_groups().join(", ")
            ));
        }
        if !filters.dietary_restrictions().is_empty() {
            prompt.push_str(&format!(
                "\n\nThe user follows these dietary restrictions: {}. Every recommended item {HARD_CONSTRAINT_MARKER} to these restrictions.",
                filters.dietary_restrictions().join(", ")
            ));
        }
        if !filters.cuisines().is_empty() {
            prompt.push_str(&format!(
                "\n\nFavour ingredients and stores suited to these cuisines: {}.",
                filters.cuisines().join(", ")
            ));
        }
    }

    if let Some(list) = shopping_list.map(str::trim).filter(|l| !l.is_empty()) {
        prompt.push_str(&format!(
            "\n\nAdditionally, the user wants to compare total costs for this shopping list: \"{list}\". \
             Find the approximate current price of each listed item at the top 2-3 most relevant stores in {city}, {country}, \
             calculate a total shopping cart cost for each store, and identify the store with the lowest total."
        ));
        if let Some(filters) = filters {
            if !filters.dietary_restrictions().is_empty() {
                prompt.push_str(&format!(
                    " Any substitutions {HARD_CONSTRAINT_MARKER} to these dietary restrictions: {}.",
                    filters.dietary_restrictions().join(", ")
                ));
            }
            if !filters.cuisines().is_empty() {
                prompt.push_str(&format!(
                    " Keep substitutions in line with these cuisines: {}.",
                    filters.cuisines().join(", ")
                ));
            }
        }
    }

    MarketRequest {
        task_prompt: prompt,
        output_schema: market_report_schema(),
    }
}
