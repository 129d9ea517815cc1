use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use super::PaginationQuery;
use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        assistance::{AssistanceDto, AssistanceInputDto, ProposeRecipientDto, RecipientDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::assistance::AssistanceParams,
        service::assistance::AssistanceService,
        state::AppState,
        util::extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Tag for grouping social assistance endpoints in OpenAPI documentation
pub static ASSISTANCE_TAG: &str = "assistance";

/// List assistance programs visible to the user's RW.
///
/// # Access Control
/// - `Admin` - Every program
/// - Any other logged-in user - Programs of their RW and programs for all RWs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination parameters
///
/// # Returns
/// - `200 OK` - Page of programs
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/assistance",
    tag = ASSISTANCE_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of programs", body = ApiResponse<PageDto<AssistanceDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_programs(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let programs = AssistanceService::new(&state.db)
        .get_paginated(&current, query.page_request())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Assistance programs",
            programs.into_dto(|p| p.into_dto()),
        )),
    ))
}

/// Get one assistance program.
///
/// # Access Control
/// - `Admin` - Any program
/// - Any other logged-in user - Programs of their RW and programs for all RWs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
///
/// # Returns
/// - `200 OK` - Program
/// - `403 Forbidden` - Program of another RW
/// - `404 Not Found` - Program not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/assistance/{id}",
    tag = ASSISTANCE_TAG,
    params(("id" = i32, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program", body = ApiResponse<AssistanceDto>),
        (status = 403, description = "Program of another RW", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto)
    ),
)]
pub async fn get_program(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let program = AssistanceService::new(&state.db)
        .get_by_id(&current, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Assistance program", program.into_dto())),
    ))
}

/// Publish an assistance program.
///
/// # Access Control
/// - `Admin` - Any RW, or all RWs when `rw` is omitted
/// - `RW` - Always bound to its own RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Program details and optional RW
///
/// # Returns
/// - `201 Created` - Program published
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Requires ADMIN or the RW itself
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/assistance",
    tag = ASSISTANCE_TAG,
    request_body = AssistanceInputDto,
    responses(
        (status = 201, description = "Program published", body = ApiResponse<AssistanceDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Requires ADMIN or the RW itself", body = ErrorDto)
    ),
)]
pub async fn create_program(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<AssistanceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let program = AssistanceService::new(&state.db)
        .create(&current, AssistanceParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Assistance program published", program.into_dto())),
    ))
}

/// Update an assistance program.
///
/// RW staff may omit `rw`; the program keeps its RW either way.
///
/// # Access Control
/// - `Admin` - Any program
/// - `RW` - Programs of its own RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
/// - `payload` - Program details and optional RW
///
/// # Returns
/// - `200 OK` - Program updated
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Program owned by another scope
/// - `404 Not Found` - Program not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/assistance/{id}",
    tag = ASSISTANCE_TAG,
    params(("id" = i32, Path, description = "Program id")),
    request_body = AssistanceInputDto,
    responses(
        (status = 200, description = "Program updated", body = ApiResponse<AssistanceDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Program owned by another scope", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto)
    ),
)]
pub async fn update_program(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<AssistanceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let program = AssistanceService::new(&state.db)
        .update(&current, id, AssistanceParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Assistance program updated", program.into_dto())),
    ))
}

/// Deactivate an assistance program.
///
/// # Access Control
/// - `Admin` - Any program
/// - `RW` - Programs of its own RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
///
/// # Returns
/// - `200 OK` - Program closed
/// - `403 Forbidden` - Program owned by another scope
/// - `404 Not Found` - Program not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/assistance/{id}",
    tag = ASSISTANCE_TAG,
    params(("id" = i32, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program closed"),
        (status = 403, description = "Program owned by another scope", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto)
    ),
)]
pub async fn delete_program(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    AssistanceService::new(&state.db).delete(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Assistance program closed")),
    ))
}

/// List recipients of a program.
///
/// # Access Control
/// - `Staff` - Recipients living in the territory they manage
/// - `WARGA` - Recipients from their own family
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
/// - `query` - Pagination parameters
///
/// # Returns
/// - `200 OK` - Page of recipients
/// - `403 Forbidden` - Program of another RW
/// - `404 Not Found` - Program not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/assistance/{id}/recipients",
    tag = ASSISTANCE_TAG,
    params(
        ("id" = i32, Path, description = "Program id"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Page of recipients", body = ApiResponse<PageDto<RecipientDto>>),
        (status = 403, description = "Program of another RW", body = ErrorDto),
        (status = 404, description = "Program not found", body = ErrorDto)
    ),
)]
pub async fn get_recipients(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let recipients = AssistanceService::new(&state.db)
        .get_recipients(&current, id, query.page_request())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Recipients",
            recipients.into_dto(|r| r.into_dto()),
        )),
    ))
}

/// Propose a resident as recipient (`DIUSULKAN`).
///
/// The resident must live in the program's RW.
///
/// # Access Control
/// - `Staff` - Residents of the territory they manage
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
/// - `payload` - Resident id and optional notes
///
/// # Returns
/// - `201 Created` - Recipient proposed
/// - `400 Bad Request` - Resident outside the program's RW
/// - `403 Forbidden` - Resident outside the user's territory
/// - `404 Not Found` - Program or resident not found
/// - `409 Conflict` - Resident already listed
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/assistance/{id}/recipients",
    tag = ASSISTANCE_TAG,
    params(("id" = i32, Path, description = "Program id")),
    request_body = ProposeRecipientDto,
    responses(
        (status = 201, description = "Recipient proposed", body = ApiResponse<RecipientDto>),
        (status = 400, description = "Resident outside the program's RW", body = ErrorDto),
        (status = 403, description = "Resident outside the user's territory", body = ErrorDto),
        (status = 404, description = "Program or resident not found", body = ErrorDto),
        (status = 409, description = "Resident already listed", body = ErrorDto)
    ),
)]
pub async fn propose_recipient(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ProposeRecipientDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let recipient = AssistanceService::new(&state.db)
        .propose(&current, id, payload.resident_id, payload.notes)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Recipient proposed", recipient.into_dto())),
    ))
}

/// Approve a proposed recipient (`DIUSULKAN` → `DISETUJUI`).
///
/// The resident's linked accounts are notified.
///
/// # Access Control
/// - `RwOrAdmin` - RW covering the recipient or an admin
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
/// - `recipient_id` - ID of the recipient entry
///
/// # Returns
/// - `200 OK` - Recipient approved
/// - `400 Bad Request` - Illegal transition
/// - `403 Forbidden` - Requires RW or ADMIN
/// - `404 Not Found` - Recipient not found
/// - `409 Conflict` - Recipient changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/assistance/{id}/recipients/{recipient_id}/approve",
    tag = ASSISTANCE_TAG,
    params(
        ("id" = i32, Path, description = "Program id"),
        ("recipient_id" = i32, Path, description = "Recipient id")
    ),
    responses(
        (status = 200, description = "Recipient approved", body = ApiResponse<RecipientDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Requires RW or ADMIN", body = ErrorDto),
        (status = 404, description = "Recipient not found", body = ErrorDto),
        (status = 409, description = "Recipient changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn approve_recipient(
    State(state): State<AppState>,
    session: Session,
    ApiPath((id, recipient_id)): ApiPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let recipient = AssistanceService::new(&state.db)
        .approve(&current, id, recipient_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Recipient approved", recipient.into_dto())),
    ))
}

/// Reject a proposed recipient (`DIUSULKAN` → `DITOLAK`).
///
/// # Access Control
/// - `RwOrAdmin` - RW covering the recipient or an admin
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
/// - `recipient_id` - ID of the recipient entry
///
/// # Returns
/// - `200 OK` - Recipient rejected
/// - `400 Bad Request` - Illegal transition
/// - `403 Forbidden` - Requires RW or ADMIN
/// - `404 Not Found` - Recipient not found
/// - `409 Conflict` - Recipient changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/assistance/{id}/recipients/{recipient_id}/reject",
    tag = ASSISTANCE_TAG,
    params(
        ("id" = i32, Path, description = "Program id"),
        ("recipient_id" = i32, Path, description = "Recipient id")
    ),
    responses(
        (status = 200, description = "Recipient rejected", body = ApiResponse<RecipientDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Requires RW or ADMIN", body = ErrorDto),
        (status = 404, description = "Recipient not found", body = ErrorDto),
        (status = 409, description = "Recipient changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn reject_recipient(
    State(state): State<AppState>,
    session: Session,
    ApiPath((id, recipient_id)): ApiPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let recipient = AssistanceService::new(&state.db)
        .reject(&current, id, recipient_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Recipient rejected", recipient.into_dto())),
    ))
}

/// Record that an approved recipient received the aid (`DISETUJUI` → `DISALURKAN`).
///
/// Stamps `distributed_at`.
///
/// # Access Control
/// - `Staff` - Covering the recipient's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the assistance program
/// - `recipient_id` - ID of the recipient entry
///
/// # Returns
/// - `200 OK` - Aid distributed
/// - `400 Bad Request` - Illegal transition
/// - `403 Forbidden` - Resident outside the user's territory
/// - `404 Not Found` - Recipient not found
/// - `409 Conflict` - Recipient changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/assistance/{id}/recipients/{recipient_id}/distribute",
    tag = ASSISTANCE_TAG,
    params(
        ("id" = i32, Path, description = "Program id"),
        ("recipient_id" = i32, Path, description = "Recipient id")
    ),
    responses(
        (status = 200, description = "Aid distributed", body = ApiResponse<RecipientDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Resident outside the user's territory", body = ErrorDto),
        (status = 404, description = "Recipient not found", body = ErrorDto),
        (status = 409, description = "Recipient changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn distribute_recipient(
    State(state): State<AppState>,
    session: Session,
    ApiPath((id, recipient_id)): ApiPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let recipient = AssistanceService::new(&state.db)
        .distribute(&current, id, recipient_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Aid distributed", recipient.into_dto())),
    ))
}
