use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        notification::{BroadcastDto, BroadcastResultDto, NotificationDto, UnreadCountDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{notification::BroadcastParams, page::PageRequest},
        service::notification::NotificationService,
        state::AppState,
        util::extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
    /// Only unread notifications.
    #[serde(default)]
    pub unread: bool,
}

/// List the user's own notifications, newest first.
///
/// # Access Control
/// - Any logged-in user - Only their own notifications
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination and the unread filter
///
/// # Returns
/// - `200 OK` - Page of notifications
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Page of notifications", body = ApiResponse<PageDto<NotificationDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let notifications = NotificationService::new(&state.db)
        .get_paginated(
            current.id(),
            PageRequest::new(query.page, query.per_page),
            query.unread,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Notifications",
            notifications.into_dto(|n| n.into_dto()),
        )),
    ))
}

/// Count the user's unread notifications.
///
/// # Access Control
/// - Any logged-in user - Only their own notifications
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
///
/// # Returns
/// - `200 OK` - Unread notification count
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Unread notification count", body = ApiResponse<UnreadCountDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_unread_count(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let unread = NotificationService::new(&state.db)
        .unread_count(current.id())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Unread count", UnreadCountDto { unread })),
    ))
}

/// Mark one notification as read.
///
/// Notifications of other users are reported as not found.
///
/// # Access Control
/// - Any logged-in user - Only their own notifications
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the notification
///
/// # Returns
/// - `200 OK` - Notification marked read
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - No such notification for this user
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No such notification for this user", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    NotificationService::new(&state.db)
        .mark_read(id, current.id())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Notification marked read")),
    ))
}

/// Mark all of the user's notifications as read.
///
/// # Access Control
/// - Any logged-in user - Only their own notifications
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
///
/// # Returns
/// - `200 OK` - All notifications marked read
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "All notifications marked read", body = ApiResponse<UnreadCountDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    NotificationService::new(&state.db)
        .mark_all_read(current.id())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "All notifications marked read",
            UnreadCountDto { unread: 0 },
        )),
    ))
}

/// Send a SYSTEM notification to every active account in the sender's territory.
///
/// # Access Control
/// - `RT` - Its own RT
/// - `RW` - Its RW or one RT of it
/// - `Admin` - Everyone or one RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Title, message and optional RT
///
/// # Returns
/// - `200 OK` - Broadcast sent
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - RT outside the sender's territory
/// - `404 Not Found` - RT not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/notifications/broadcast",
    tag = NOTIFICATION_TAG,
    request_body = BroadcastDto,
    responses(
        (status = 200, description = "Broadcast sent", body = ApiResponse<BroadcastResultDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "RT outside the sender's territory", body = ErrorDto),
        (status = 404, description = "RT not found", body = ErrorDto)
    ),
)]
pub async fn broadcast(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<BroadcastDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let recipients = NotificationService::new(&state.db)
        .broadcast(&current, BroadcastParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Broadcast sent",
            BroadcastResultDto { recipients },
        )),
    ))
}
