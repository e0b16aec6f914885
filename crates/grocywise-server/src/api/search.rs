use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Extension, Json,
};
use grocywise_core::{chart_series, ChartPoint, FilterSet, LocationSelector, QueryResult};
use grocywise_gemini::GenerationService;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchRequest {
    country: String,
    city: String,
    #[serde(default)]
    shopping_list: Option<String>,
    #[serde(default)]
    food_groups: Vec<String>,
    #[serde(default)]
    dietary_restrictions: Vec<String>,
    #[serde(default)]
    cuisines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchData {
    #[serde(flatten)]
    result: QueryResult,
    chart: Vec<ChartPoint>,
}

pub(super) async fn run_search<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: GenerationService + Send + Sync + 'static,
{
    let RequestId(request_id) = req_id;

    let Json(body) = body
        .map_err(|e| ApiError::new(request_id.clone(), "validation_error", e.body_text()))?;

    let location = LocationSelector::new(&state.directory, &body.country, &body.city)
        .map_err(|e| ApiError::new(request_id.clone(), "validation_error", e.to_string()))?;
    let filters = FilterSet::from_labels(
        &body.food_groups,
        &body.dietary_restrictions,
        &body.cuisines,
    )
    .map_err(|e| ApiError::new(request_id.clone(), "validation_error", e.to_string()))?;

    let query = state
        .pipeline
        .run(&location, body.shopping_list.as_deref(), Some(&filters));
    let outcome = match state.query_timeout {
        Some(limit) => tokio::time::timeout(limit, query).await.map_err(|_| {
            tracing::warn!(
                request_id = %request_id,
                timeout_secs = limit.as_secs(),
                "market query timed out"
            );
            ApiError::new(request_id.clone(), "timeout", "market query timed out")
        })?,
        None => query.await,
    };

    let result = outcome
        .map_err(|e| ApiError::new(request_id.clone(), "upstream_error", e.message()))?;
    let chart = result
        .shopping_comparison
        .as_deref()
        .map(chart_series)
        .unwrap_or_default();

    Ok(Json(ApiResponse {
        data: SearchData { result, chart },
        meta: ResponseMeta::new(request_id),
    }))
}
