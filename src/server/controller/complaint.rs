use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        complaint::{ComplaintDto, ComplaintResponseDto, ComplaintStatus, CreateComplaintForm},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            complaint::{ComplaintQuery, CreateComplaintParams},
            page::PageRequest,
        },
        service::complaint::ComplaintService,
        state::AppState,
        util::{
            extract::{ApiJson, ApiPath, ApiQuery},
            multipart::MultipartForm,
        },
    },
};

/// Tag for grouping complaint endpoints in OpenAPI documentation
pub static COMPLAINT_TAG: &str = "complaint";

const ATTACHMENT_FIELD: &str = "attachment";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ComplaintListQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
    pub status: Option<ComplaintStatus>,
}

/// List complaints.
///
/// Newest first, optionally filtered by status.
///
/// # Access Control
/// - `Staff` - Complaints of the territory they manage
/// - Any other logged-in user - Their own complaints
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination and optional status filter
///
/// # Returns
/// - `200 OK` - Page of complaints
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = COMPLAINT_TAG,
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "Page of complaints", body = ApiResponse<PageDto<ComplaintDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_complaints(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<ComplaintListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let complaints = ComplaintService::new(&state.db)
        .get_paginated(
            &current,
            ComplaintQuery {
                page: PageRequest::new(query.page, query.per_page),
                status: query.status,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Complaints",
            complaints.into_dto(|c| c.into_dto()),
        )),
    ))
}

/// Get one complaint.
///
/// # Access Control
/// - `Staff` - Complaints of the territory they manage
/// - Any other logged-in user - Their own complaints
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the complaint
///
/// # Returns
/// - `200 OK` - Complaint
/// - `403 Forbidden` - Neither reporter nor covering staff
/// - `404 Not Found` - Complaint not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    tag = COMPLAINT_TAG,
    params(("id" = i32, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint", body = ApiResponse<ComplaintDto>),
        (status = 403, description = "Neither reporter nor covering staff", body = ErrorDto),
        (status = 404, description = "Complaint not found", body = ErrorDto)
    ),
)]
pub async fn get_complaint(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let complaint = ComplaintService::new(&state.db)
        .get_by_id(&current, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Complaint", complaint.into_dto())),
    ))
}

/// File a complaint to the reporter's home RT.
///
/// The complaint starts as `DITERIMA` and the RT staff are notified.
///
/// # Access Control
/// - Any logged-in user with a home RT
///
/// # Arguments
/// - `state` - Application state containing the database connection and upload storage
/// - `session` - User's session for authentication
/// - `multipart` - Form fields plus an optional attachment file
///
/// # Returns
/// - `201 Created` - Complaint filed
/// - `400 Bad Request` - Invalid fields, attachment or no home RT
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = COMPLAINT_TAG,
    request_body(content = CreateComplaintForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Complaint filed", body = ApiResponse<ComplaintDto>),
        (status = 400, description = "Invalid fields, attachment or no home RT", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn create_complaint(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let form = MultipartForm::read(multipart, ATTACHMENT_FIELD).await?;
    let params = CreateComplaintParams::from_form(&form)?;

    let complaint = ComplaintService::new(&state.db)
        .create(&current, &state.uploads, params, form.file)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Complaint filed", complaint.into_dto())),
    ))
}

/// Start handling a complaint (`DITERIMA` → `DIPROSES`).
///
/// # Access Control
/// - `Staff` - Covering the complaint's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the complaint
///
/// # Returns
/// - `200 OK` - Complaint in process
/// - `400 Bad Request` - Illegal transition
/// - `403 Forbidden` - Requires staff covering the RT
/// - `404 Not Found` - Complaint not found
/// - `409 Conflict` - Complaint changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/process",
    tag = COMPLAINT_TAG,
    params(("id" = i32, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint in process", body = ApiResponse<ComplaintDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Requires staff covering the RT", body = ErrorDto),
        (status = 404, description = "Complaint not found", body = ErrorDto),
        (status = 409, description = "Complaint changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn process_complaint(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let complaint = ComplaintService::new(&state.db)
        .process(&current, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Complaint in process", complaint.into_dto())),
    ))
}

/// Resolve a complaint (`DIPROSES` → `SELESAI`).
///
/// A non-blank response is required and sent to the reporter.
///
/// # Access Control
/// - `Staff` - Covering the complaint's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the complaint
/// - `payload` - Response for the reporter
///
/// # Returns
/// - `200 OK` - Complaint resolved
/// - `400 Bad Request` - Illegal transition, missing or too long response
/// - `403 Forbidden` - Requires staff covering the RT
/// - `404 Not Found` - Complaint not found
/// - `409 Conflict` - Complaint changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/resolve",
    tag = COMPLAINT_TAG,
    params(("id" = i32, Path, description = "Complaint id")),
    request_body = ComplaintResponseDto,
    responses(
        (status = 200, description = "Complaint resolved", body = ApiResponse<ComplaintDto>),
        (status = 400, description = "Illegal transition, missing or too long response", body = ErrorDto),
        (status = 403, description = "Requires staff covering the RT", body = ErrorDto),
        (status = 404, description = "Complaint not found", body = ErrorDto),
        (status = 409, description = "Complaint changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn resolve_complaint(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ComplaintResponseDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let complaint = ComplaintService::new(&state.db)
        .resolve(&current, id, Some(payload.response))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Complaint resolved", complaint.into_dto())),
    ))
}

/// Reject a complaint (`DITERIMA` or `DIPROSES` → `DITOLAK`).
///
/// A non-blank response is required and sent to the reporter.
///
/// # Access Control
/// - `Staff` - Covering the complaint's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the complaint
/// - `payload` - Response for the reporter
///
/// # Returns
/// - `200 OK` - Complaint rejected
/// - `400 Bad Request` - Illegal transition, missing or too long response
/// - `403 Forbidden` - Requires staff covering the RT
/// - `404 Not Found` - Complaint not found
/// - `409 Conflict` - Complaint changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/reject",
    tag = COMPLAINT_TAG,
    params(("id" = i32, Path, description = "Complaint id")),
    request_body = ComplaintResponseDto,
    responses(
        (status = 200, description = "Complaint rejected", body = ApiResponse<ComplaintDto>),
        (status = 400, description = "Illegal transition, missing or too long response", body = ErrorDto),
        (status = 403, description = "Requires staff covering the RT", body = ErrorDto),
        (status = 404, description = "Complaint not found", body = ErrorDto),
        (status = 409, description = "Complaint changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn reject_complaint(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ComplaintResponseDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let complaint = ComplaintService::new(&state.db)
        .reject(&current, id, Some(payload.response))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Complaint rejected", complaint.into_dto())),
    ))
}
