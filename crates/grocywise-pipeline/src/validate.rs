//! Structural validation of the service's JSON payload.

use grocywise_core::lenient;
use grocywise_core::{ProduceDeal, StoreComparison, StoreProfile};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::schema::REQUIRED_FIELDS;

/// A payload that passed validation, before grounding and ranking are
/// applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReport {
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::records")]
    pub produce: Vec<ProduceDeal>,
    #[serde(deserialize_with = "lenient::records")]
    pub stores: Vec<StoreProfile>,
    #[serde(default, deserialize_with = "lenient::opt_records")]
    pub shopping_comparison: Option<Vec<StoreComparison>>,
}

/// Parse and check the raw text of a generation response.
///
/// A payload wrapped in a Markdown code fence is unwrapped first. A
/// required field that is present but `null` counts as missing. Unknown
/// fields are ignored.
///
/// # Errors
///
/// - [`ValidationError::EmptyResponse`] for empty or whitespace-only text.
/// - [`ValidationError::MalformedJson`] if the text is not JSON.
/// - [`ValidationError::MissingRequiredField`] if the payload is not an
///   object or lacks `summary`, `produce` or `stores`.
pub fn validate_response(raw: &str) -> Result<MarketReport, ValidationError> {
    let text = strip_code_fence(raw.trim());
    if text.is_empty() {
        return Err(ValidationError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(text)?;

    for field in REQUIRED_FIELDS {
        if value.get(field).is_none_or(Value::is_null) {
            return Err(ValidationError::MissingRequiredField(field));
        }
    }

    let raw_counts = [
        ("produce", array_len(&value, "produce")),
        ("stores", array_len(&value, "stores")),
        ("shoppingComparison", array_len(&value, "shoppingComparison")),
    ];

    let report: MarketReport = serde_json::from_value(value)?;

    let kept = [
        report.produce.len(),
        report.stores.len(),
        report.shopping_comparison.as_ref().map_or(0, Vec::len),
    ];
    for ((field, raw_len), kept_len) in raw_counts.into_iter().zip(kept) {
        if raw_len > kept_len {
            tracing::warn!(
                field,
                dropped = raw_len - kept_len,
                "dropped non-conforming entries from response"
            );
        }
    }

    Ok(report)
}

fn array_len(value: &Value, field: &str) -> usize {
    value.get(field).and_then(Value::as_array).map_or(0, Vec::len)
}

/// Unwrap a payload of the form ```` ```json\n{...}\n``` ````.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some((_, body)) = rest.split_once('\n') else {
        return text;
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
