// handlers/protected/locations.rs - /api/location endpoints

use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::Location;
use crate::filter::LOCATION_SORT_FIELDS;
use crate::middleware::{
    list_envelope, ApiResponse, ApiResult, AuthUser, IdBody, Json, Path, Query,
};
use crate::services::location_service;

use super::query::ListQuery;

#[derive(Debug, Deserialize)]
pub struct LocationBody {
    pub name: String,
    pub address: Option<String>,
}

/// POST /api/location
pub async fn location_create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<LocationBody>,
) -> ApiResult<IdBody> {
    let id = location_service::create_location(&state.stores, &auth, &body.name, body.address).await?;
    Ok(ApiResponse::id(id))
}

/// GET /api/location?page&sort_field&sort_dir&is_attached_to_container=T|F
pub async fn location_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    let page = location_service::list_locations(
        &state.stores,
        &auth,
        query.attached_to_container(),
        &query.sort(LOCATION_SORT_FIELDS),
        query.limit(state.page_size()),
    )
    .await?;
    Ok(ApiResponse::success(list_envelope("locations", page)?))
}

/// GET /api/location/:id
pub async fn location_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Location> {
    let location = location_service::get_location(&state.stores, &auth, id).await?;
    Ok(ApiResponse::success(location))
}

/// PUT /api/location/:id
pub async fn location_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<LocationBody>,
) -> ApiResult<()> {
    location_service::update_location(&state.stores, &auth, id, &body.name, body.address).await?;
    Ok(ApiResponse::<()>::no_content())
}

/// DELETE /api/location/:id - containers stored here are detached
pub async fn location_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    location_service::delete_location(&state.stores, &auth, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
