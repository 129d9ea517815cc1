//! Request extractors that reject with `AppError`.
//!
//! axum's own `Json`, `Query` and `Path` extractors answer malformed input with a
//! plain-text body. These wrappers delegate to them and turn the rejection into
//! `AppError::BadRequest`, so clients always receive the error envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, OptionalFromRequest, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::server::error::AppError;

/// JSON request body.
pub struct ApiJson<T>(pub T);

/// Query string parameters.
pub struct ApiQuery<T>(pub T);

/// Path parameters.
pub struct ApiPath<T>(pub T);

fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::debug!("Rejected JSON body: {}", rejection.body_text());
    AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
}

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        Ok(Self(value))
    }
}

/// A missing body (no JSON content type) yields `None`; a malformed one is still an error.
impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let value = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        Ok(value.map(|Json(value)| Self(value)))
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                AppError::BadRequest(format!(
                    "Invalid query parameters: {}",
                    rejection.body_text()
                ))
            })?;

        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                AppError::BadRequest(format!("Invalid path: {}", rejection.body_text()))
            })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, StatusCode},
        response::IntoResponse,
    };
    use serde::Deserialize;

    use super::*;
    use crate::model::user::{LoginDto, Role};

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn assert_enveloped(err: AppError) {
        assert!(matches!(err, AppError::BadRequest(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        for body in [r#"{"username": "budi""#, r#"{"username": "budi"}"#, "[]"] {
            let result =
                <ApiJson<LoginDto> as FromRequest<()>>::from_request(json_request(body), &()).await;

            match result {
                Err(err) => assert_enveloped(err),
                Ok(_) => panic!("Expected {} to be rejected", body),
            }
        }
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let request = json_request(r#"{"username": "budi", "password": "rahasia-123"}"#);
        let ApiJson(dto) = <ApiJson<LoginDto> as FromRequest<()>>::from_request(request, &())
            .await
            .unwrap();

        assert_eq!(dto.username, "budi");
    }

    #[tokio::test]
    async fn absent_optional_body_is_none() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let value = <ApiJson<LoginDto> as OptionalFromRequest<()>>::from_request(request, &())
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[derive(Debug, Deserialize)]
    struct RoleFilter {
        #[allow(dead_code)]
        role: Option<Role>,
    }

    #[tokio::test]
    async fn unknown_enum_in_query_is_bad_request() {
        let (mut parts, _) = Request::builder()
            .uri("/api/users?role=KADES")
            .body(())
            .unwrap()
            .into_parts();

        match ApiQuery::<RoleFilter>::from_request_parts(&mut parts, &()).await {
            Err(err) => assert_enveloped(err),
            Ok(_) => panic!("Expected unknown role to be rejected"),
        }
    }
}
