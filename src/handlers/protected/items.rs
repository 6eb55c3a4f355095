// handlers/protected/items.rs - container items and item search

use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::filter::ITEM_SORT_FIELDS;
use crate::middleware::{
    list_envelope, ApiResponse, ApiResult, AuthUser, IdBody, Json, Path, Query,
};
use crate::services::item_service::{self, ItemChanges};

use super::query::ListQuery;

#[derive(Debug, Deserialize)]
pub struct NewItemBody {
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemUpdateBody {
    pub body: Option<String>,
    pub quantity: Option<i32>,
}

/// POST /api/container/:id/item
pub async fn item_create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(container_id): Path<i64>,
    Json(body): Json<NewItemBody>,
) -> ApiResult<IdBody> {
    let id = item_service::create_item(&state.stores, &auth, container_id, &body.body, body.quantity)
        .await?;
    Ok(ApiResponse::id(id))
}

/// PUT /api/container/:id/item/:item_id - only supplied fields change
pub async fn item_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((container_id, item_id)): Path<(i64, i64)>,
    Json(body): Json<ItemUpdateBody>,
) -> ApiResult<IdBody> {
    let changes = ItemChanges {
        body: body.body,
        quantity: body.quantity,
    };
    let id = item_service::update_item(&state.stores, &auth, container_id, item_id, changes).await?;
    Ok(ApiResponse::id(id))
}

/// DELETE /api/container/:id/item/:item_id
pub async fn item_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((container_id, item_id)): Path<(i64, i64)>,
) -> ApiResult<()> {
    item_service::delete_item(&state.stores, &auth, container_id, item_id).await?;
    Ok(ApiResponse::<()>::no_content())
}

/// GET /api/container/:id/item?page&sort_field&sort_dir
pub async fn item_list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(container_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    let page = item_service::list_items(
        &state.stores,
        &auth,
        container_id,
        &query.sort(ITEM_SORT_FIELDS),
        query.limit(state.page_size()),
    )
    .await?;
    Ok(ApiResponse::success(list_envelope("items", page)?))
}

/// GET /api/item/search?term&page&sort_field&sort_dir
pub async fn item_search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    let page = item_service::search_items(
        &state.stores,
        &auth,
        query.term.as_deref().unwrap_or_default(),
        &query.sort(ITEM_SORT_FIELDS),
        query.limit(state.page_size()),
    )
    .await?;
    Ok(ApiResponse::success(list_envelope("items", page)?))
}
