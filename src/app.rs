use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, ConfigError};
use crate::database::{DatabaseManager, Stores};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Shared, cheaply cloneable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseManager,
    pub stores: Stores,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseManager) -> Result<Self, ConfigError> {
        let stores = Stores::new(db.pool().clone(), &config.security)?;
        Ok(Self {
            config: Arc::new(config),
            db,
            stores,
        })
    }

    pub fn page_size(&self) -> i64 {
        self.config.api.page_size
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(user_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        .with_state(state.clone());

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/register", post(public::user_register))
        .route("/api/user/login", post(public::user_login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{containers, items, locations};

    Router::new()
        .route(
            "/api/container",
            post(containers::container_create).get(containers::container_list),
        )
        .route(
            "/api/container/:id",
            get(containers::container_get)
                .put(containers::container_update)
                .delete(containers::container_delete),
        )
        .route(
            "/api/container/:id/item",
            post(items::item_create).get(items::item_list),
        )
        .route(
            "/api/container/:id/item/:item_id",
            put(items::item_update).delete(items::item_delete),
        )
        .route("/api/item/search", get(items::item_search))
        .route(
            "/api/location",
            post(locations::location_create).get(locations::location_list),
        )
        .route(
            "/api/location/:id",
            get(locations::location_get)
                .put(locations::location_update)
                .delete(locations::location_delete),
        )
        .route_layer(ServiceBuilder::new().layer(from_fn_with_state(state, jwt_auth_middleware)))
}
