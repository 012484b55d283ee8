//! Path and query extractors whose rejections use the API error body.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use common::AppError;

/// `Path<T>` that rejects with `AppError` instead of a plain-text body
pub struct AppPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                if e.status().is_server_error() {
                    AppError::internal(e.body_text())
                } else {
                    AppError::bad_request(e.body_text())
                }
            })?;

        Ok(AppPath(value))
    }
}

/// `Query<T>` that rejects with `AppError` instead of a plain-text body
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(AppQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    struct Filter {
        limit: u32,
    }

    #[tokio::test]
    async fn test_query_rejection_is_bad_request() {
        let (mut parts, _) = Request::builder()
            .uri("/stores?limit=many")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let result = AppQuery::<Filter>::from_request_parts(&mut parts, &()).await;

        match result {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.starts_with("Failed to deserialize query string"))
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("query should be rejected"),
        }
    }

    #[tokio::test]
    async fn test_query_accepts_valid_input() {
        let (mut parts, _) = Request::builder()
            .uri("/stores?limit=5")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let AppQuery(filter) = AppQuery::<Filter>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(filter.limit, 5);
    }

    #[tokio::test]
    async fn test_path_outside_router_is_internal() {
        let (mut parts, _) = Request::builder()
            .uri("/stores/1")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let result = AppPath::<Uuid>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
