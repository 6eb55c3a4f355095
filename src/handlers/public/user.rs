// handlers/public/user.rs - POST /api/user/register and /api/user/login

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, IdBody, Json};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenBody {
    pub token: String,
}

/// POST /api/user/register - create an account, returning its id
pub async fn user_register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<IdBody> {
    let id = state
        .stores
        .users
        .register(&credentials.email, &credentials.password)
        .await?;
    Ok(ApiResponse::id(id))
}

/// POST /api/user/login - exchange credentials for a signed token
///
/// Any mismatch is reported as `401 Authentication failure.` without saying
/// which half was wrong.
pub async fn user_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<TokenBody> {
    let token = state
        .stores
        .users
        .login(&credentials.email, &credentials.password)
        .await?;
    Ok(ApiResponse::success(TokenBody { token }))
}
