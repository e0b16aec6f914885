//! Response schema handed to the generation service as a structural
//! constraint. Uses the service's OpenAPI subset (upper-case type names).

use serde_json::{json, Value};

/// Top-level fields every accepted payload must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["summary", "produce", "stores"];

/// Schema for the market report: summary, produce, stores and an optional
/// shopping-list comparison.
#[must_use]
pub fn market_report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Overview of local price trends and where to shop."
            },
            "produce": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "priceEstimate": {"type": "STRING", "description": "Price in local currency, e.g. $1.20/kg"},
                        "seasonality": {"type": "STRING", "description": "In-Season or Out-of-Season"},
                        "reason": {"type": "STRING"}
                    },
                    "required": ["name", "priceEstimate", "seasonality", "reason"]
                }
            },
            "stores": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "category": {
                            "type": "STRING",
                            "enum": ["Supermarket", "Local Market", "Discount Store"]
                        },
                        "highlights": {"type": "STRING"},
                        "accessibility": {"type": "STRING"}
                    },
                    "required": ["name", "category", "highlights", "accessibility"]
                }
            },
            "shoppingComparison": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "storeName": {"type": "STRING"},
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "itemName": {"type": "STRING"},
                                    "price": {"type": "STRING"},
                                    "notes": {"type": "STRING"}
                                },
                                "required": ["itemName", "price", "notes"]
                            }
                        },
                        "totalCost": {"type": "STRING", "description": "Total in local currency, e.g. $15.50"},
                        "isLowestPrice": {"type": "BOOLEAN"}
                    },
                    "required": ["storeName", "items", "totalCost", "isLowestPrice"]
                }
            }
        },
        "required": REQUIRED_FIELDS
    })
}
