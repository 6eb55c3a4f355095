// middleware/extract.rs - request extractors that reject with `ApiError`
//
// Drop-in replacements for axum's `Json`, `Path` and `Query`. axum's own
// rejections are plain text; these wrap them so a malformed id, body or
// query string comes back in the usual `{ code, text }` envelope.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug)]
pub struct Json<T>(pub T);

/// Typed path parameters.
#[derive(Debug)]
pub struct Path<T>(pub T);

/// Typed query string.
#[derive(Debug)]
pub struct Query<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::bad_request("Expected a JSON request body")
        }
        other => ApiError::bad_request(other.body_text()),
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Path(value)| Path(value))
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| Query(value))
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn json_request(content_type: &str, body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn json_body_is_decoded() {
        let req = json_request("application/json", r#"{"name":"Garage"}"#);
        let Json(named) = Json::<Named>::from_request(req, &()).await.unwrap();
        assert_eq!(named.name, "Garage");
    }

    #[tokio::test]
    async fn missing_field_is_a_bad_request() {
        let req = json_request("application/json", r#"{"address":"x"}"#);
        let err = Json::<Named>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), -1);
        assert!(err.message().contains("name"), "{}", err.message());
    }

    #[tokio::test]
    async fn form_body_is_a_bad_request() {
        let req = json_request("application/x-www-form-urlencoded", "name=Garage");
        let err = Json::<Named>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Expected a JSON request body");
    }

    #[tokio::test]
    async fn unparseable_query_is_a_bad_request() {
        #[derive(Debug, Deserialize)]
        struct Paging {
            #[allow(dead_code)]
            page: i64,
        }

        let req = axum::http::Request::builder()
            .uri("/?page=two")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = Query::<Paging>::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.error_code(), -1);
    }
}
