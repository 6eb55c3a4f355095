// handlers/protected/containers.rs - /api/container endpoints

use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::Container;
use crate::filter::CONTAINER_SORT_FIELDS;
use crate::middleware::{
    list_envelope, ApiResponse, ApiResult, AuthUser, IdBody, Json, Path, Query,
};
use crate::services::container_service;

use super::query::ListQuery;

#[derive(Debug, Deserialize)]
pub struct ContainerBody {
    pub name: String,
    /// Absent (or null) leaves the container unattached.
    pub location_id: Option<i64>,
}

/// POST /api/container
pub async fn container_create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ContainerBody>,
) -> ApiResult<IdBody> {
    let id =
        container_service::create_container(&state.stores, &auth, &body.name, body.location_id)
            .await?;
    Ok(ApiResponse::id(id))
}

/// GET /api/container?page&sort_field&sort_dir&location_id=1,2
pub async fn container_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    let page = container_service::list_containers(
        &state.stores,
        &auth,
        query.location_ids(),
        &query.sort(CONTAINER_SORT_FIELDS),
        query.limit(state.page_size()),
    )
    .await?;
    Ok(ApiResponse::success(list_envelope("containers", page)?))
}

/// GET /api/container/:id
pub async fn container_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Container> {
    let container = container_service::get_container(&state.stores, &auth, id).await?;
    Ok(ApiResponse::success(container))
}

/// PUT /api/container/:id - rename and move (or detach)
pub async fn container_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<ContainerBody>,
) -> ApiResult<()> {
    container_service::update_container(&state.stores, &auth, id, &body.name, body.location_id)
        .await?;
    Ok(ApiResponse::<()>::no_content())
}

/// DELETE /api/container/:id
pub async fn container_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    container_service::delete_container(&state.stores, &auth, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
