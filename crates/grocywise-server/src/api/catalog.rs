use axum::{extract::State, response::IntoResponse, Extension, Json};
use grocywise_core::{CountryGroup, LocationSelector, CUISINES, DIETARY_RESTRICTIONS, FOOD_GROUPS};
use serde::Serialize;

use super::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct LocationsData {
    countries: Vec<CountryGroup>,
    default: LocationSelector,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FiltersData {
    food_groups: &'static [&'static str],
    dietary_restrictions: &'static [&'static str],
    cuisines: &'static [&'static str],
}

pub(super) async fn list_locations<S>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: LocationsData {
            countries: state.directory.groups().to_vec(),
            default: state.directory.default_selection(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_filters(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: FiltersData {
            food_groups: FOOD_GROUPS,
            dietary_restrictions: DIETARY_RESTRICTIONS,
            cuisines: CUISINES,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
