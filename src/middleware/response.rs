use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::filter::Paged;

/// Wrapper for API responses carrying a status code alongside the body
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None, // Default to 200 OK
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
        }
    }

    /// Create a 204 No Content response (data will be ignored)
    pub fn no_content() -> ApiResponse<()> {
        ApiResponse::with_status((), StatusCode::NO_CONTENT)
    }
}

impl ApiResponse<IdBody> {
    /// `{ "id": n }` for a freshly written entity.
    pub fn id(id: i64) -> Self {
        Self::success(IdBody { id })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        // For 204 No Content, return empty response
        if status == StatusCode::NO_CONTENT {
            return status.into_response();
        }

        match serde_json::to_value(&self.data) {
            Ok(value) => (status, Json(value)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                ApiError::internal_server_error("Failed to serialize response data").into_response()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdBody {
    pub id: i64,
}

/// Render a page as `{ "<key>": [...], "meta": {...} }`.
pub fn list_envelope<T: Serialize>(key: &str, page: Paged<T>) -> Result<Value, ApiError> {
    let rows = serde_json::to_value(&page.rows).map_err(|e| {
        tracing::error!("Failed to serialize {}: {}", key, e);
        ApiError::internal_server_error("Failed to serialize response data")
    })?;
    let meta = serde_json::to_value(page.meta).map_err(|e| {
        tracing::error!("Failed to serialize page meta: {}", e);
        ApiError::internal_server_error("Failed to serialize response data")
    })?;

    let mut body = Map::new();
    body.insert(key.to_string(), rows);
    body.insert("meta".to_string(), meta);
    Ok(Value::Object(body))
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PageMeta;
    use serde_json::json;

    #[test]
    fn list_envelope_names_the_collection() {
        let page = Paged {
            rows: vec![json!({"id": 1}), json!({"id": 2})],
            meta: PageMeta {
                request_total: 2,
                total: 22,
                pages: 2,
            },
        };
        let body = list_envelope("containers", page).unwrap();
        assert_eq!(
            body,
            json!({
                "containers": [{"id": 1}, {"id": 2}],
                "meta": {"request_total": 2, "total": 22, "pages": 2}
            })
        );
    }

    #[test]
    fn empty_page_still_has_an_array() {
        let page: Paged<Value> = Paged {
            rows: vec![],
            meta: PageMeta::default(),
        };
        let body = list_envelope("items", page).unwrap();
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["meta"]["pages"], json!(0));
    }

    #[test]
    fn no_content_has_no_body() {
        let response = ApiResponse::<()>::no_content().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn id_body_shape() {
        assert_eq!(serde_json::to_value(IdBody { id: 7 }).unwrap(), json!({"id": 7}));
    }
}
