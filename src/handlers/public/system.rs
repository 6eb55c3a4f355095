// handlers/public/system.rs - GET / and GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Boxmeup API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "user": "/api/user/register, /api/user/login (public)",
            "container": "/api/container[/:id[/item[/:item_id]]] (protected)",
            "item": "/api/item/search (protected)",
            "location": "/api/location[/:id] (protected)",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
