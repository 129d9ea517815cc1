//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by services and controllers. It wraps the
//! domain-specific errors and implements `IntoResponse`, so handlers can use `?` and get
//! the standard error envelope with the right status code.

pub mod auth;
pub mod config;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{ErrorDto, FieldErrorDto},
    server::{
        error::{auth::AuthError, config::ConfigError, internal::InternalError},
        util::validate::FieldError,
    },
};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion. `AuthError` maps its own status
/// codes; the request-level variants map to 4xx codes and everything else is a 500 with
/// the detail logged server-side.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error (401 / 403).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Unexpected internal state, always a 500.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx driver error, raised by the session store.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error while storing or serving uploads.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found, 404 with the provided message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request, 400 with the provided message.
    ///
    /// Also used for illegal workflow transitions and rejected uploads.
    #[error("{0}")]
    BadRequest(String),

    /// Uniqueness violation (NIK, KK number, username...), 409.
    #[error("{0}")]
    Conflict(String),

    /// Request body failed field validation, 400 with the field errors as `data`.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Internal server error with custom message, logged and replaced with a generic
    /// message for the client.
    #[error("{0}")]
    InternalError(String),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `BadRequest` and `Validation`
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `Conflict`
/// - Variable - `AuthErr`, delegated to `AuthError::into_response()`
/// - 500 Internal Server Error - everything else
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, Json(ErrorDto::new(msg))).into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(msg))).into_response()
            }
            Self::Conflict(msg) => (StatusCode::CONFLICT, Json(ErrorDto::new(msg))).into_response(),
            Self::Validation(errors) => {
                let mut body = ErrorDto::new("Validation failed");
                body.data = Some(
                    errors
                        .into_iter()
                        .map(|e| FieldErrorDto {
                            field: e.field,
                            message: e.message,
                        })
                        .collect(),
                );

                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto::new("Internal server error")),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error and returns a generic message so implementation details never
/// reach the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}
