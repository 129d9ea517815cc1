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
        document::{
            ApproveDocumentDto, CreateDocumentForm, DocumentDto, DocumentStatus,
            RejectDocumentDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            document::{CreateDocumentParams, DocumentQuery},
            page::PageRequest,
        },
        service::document::DocumentService,
        state::AppState,
        util::{
            extract::{ApiJson, ApiPath, ApiQuery},
            multipart::MultipartForm,
        },
    },
};

/// Tag for grouping document request endpoints in OpenAPI documentation
pub static DOCUMENT_TAG: &str = "document";

/// Multipart field carrying the optional attachment.
const ATTACHMENT_FIELD: &str = "attachment";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentListQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
    pub status: Option<DocumentStatus>,
}

/// List document requests within the user's territory.
///
/// Newest first, optionally filtered by status.
///
/// # Access Control
/// - `Staff` - Requests for residents of the territory they manage
/// - `WARGA` - Requests for their own family
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination and optional status filter
///
/// # Returns
/// - `200 OK` - Page of document requests
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = DOCUMENT_TAG,
    params(DocumentListQuery),
    responses(
        (status = 200, description = "Page of document requests", body = ApiResponse<PageDto<DocumentDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_documents(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<DocumentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let documents = DocumentService::new(&state.db)
        .get_paginated(
            &current,
            DocumentQuery {
                page: PageRequest::new(query.page, query.per_page),
                status: query.status,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Document requests",
            documents.into_dto(|d| d.into_dto()),
        )),
    ))
}

/// Get one document request.
///
/// # Access Control
/// - `Staff` - Requests for residents of the territory they manage
/// - `WARGA` - Requests for their own family
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the document request
///
/// # Returns
/// - `200 OK` - Document request
/// - `403 Forbidden` - Request outside the user's territory
/// - `404 Not Found` - Document request not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request id")),
    responses(
        (status = 200, description = "Document request", body = ApiResponse<DocumentDto>),
        (status = 403, description = "Request outside the user's territory", body = ErrorDto),
        (status = 404, description = "Document request not found", body = ErrorDto)
    ),
)]
pub async fn get_document(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let document = DocumentService::new(&state.db)
        .get_by_id(&current, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Document request", document.into_dto())),
    ))
}

/// Request a letter for a resident.
///
/// The request starts as `DIAJUKAN` and the RT staff are notified. An optional attachment
/// is stored under the uploads directory.
///
/// # Access Control
/// - `Staff` - Any resident of the territory they manage
/// - `WARGA` - Themselves and their family members
///
/// # Arguments
/// - `state` - Application state containing the database connection and upload storage
/// - `session` - User's session for authentication
/// - `multipart` - Form fields plus an optional attachment file
///
/// # Returns
/// - `201 Created` - Request submitted
/// - `400 Bad Request` - Invalid fields or attachment
/// - `403 Forbidden` - Resident outside the user's household or territory
/// - `404 Not Found` - Resident not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = DOCUMENT_TAG,
    request_body(content = CreateDocumentForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Request submitted", body = ApiResponse<DocumentDto>),
        (status = 400, description = "Invalid fields or attachment", body = ErrorDto),
        (status = 403, description = "Resident outside the user's household or territory", body = ErrorDto),
        (status = 404, description = "Resident not found", body = ErrorDto)
    ),
)]
pub async fn create_document(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let form = MultipartForm::read(multipart, ATTACHMENT_FIELD).await?;
    let params = CreateDocumentParams::from_form(&form)?;

    let document = DocumentService::new(&state.db)
        .create(&current, &state.uploads, params, form.file)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Document request submitted", document.into_dto())),
    ))
}

/// Start processing a submitted request (`DIAJUKAN` → `DIPROSES`).
///
/// The requester is notified.
///
/// # Access Control
/// - `Staff` - Covering the resident's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the document request
///
/// # Returns
/// - `200 OK` - Request in process
/// - `400 Bad Request` - Illegal transition
/// - `403 Forbidden` - Requires staff covering the resident
/// - `404 Not Found` - Document request not found
/// - `409 Conflict` - Request changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/documents/{id}/process",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request id")),
    responses(
        (status = 200, description = "Request in process", body = ApiResponse<DocumentDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Requires staff covering the resident", body = ErrorDto),
        (status = 404, description = "Document request not found", body = ErrorDto),
        (status = 409, description = "Request changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn process_document(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let document = DocumentService::new(&state.db).process(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Document request in process", document.into_dto())),
    ))
}

/// Approve a request in process (`DIPROSES` → `DISETUJUI`).
///
/// The body is optional and only carries notes for the requester.
///
/// # Access Control
/// - `Staff` - Covering the resident's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the document request
/// - `payload` - Optional notes
///
/// # Returns
/// - `200 OK` - Request approved
/// - `400 Bad Request` - Illegal transition or notes too long
/// - `403 Forbidden` - Requires staff covering the resident
/// - `404 Not Found` - Document request not found
/// - `409 Conflict` - Request changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/documents/{id}/approve",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request id")),
    request_body = ApproveDocumentDto,
    responses(
        (status = 200, description = "Request approved", body = ApiResponse<DocumentDto>),
        (status = 400, description = "Illegal transition or notes too long", body = ErrorDto),
        (status = 403, description = "Requires staff covering the resident", body = ErrorDto),
        (status = 404, description = "Document request not found", body = ErrorDto),
        (status = 409, description = "Request changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn approve_document(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    payload: Option<ApiJson<ApproveDocumentDto>>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let notes = payload.and_then(|ApiJson(dto)| dto.notes);
    let document = DocumentService::new(&state.db)
        .approve(&current, id, notes)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Document request approved", document.into_dto())),
    ))
}

/// Sign an approved request and assign its letter number (`DISETUJUI` → `DITANDATANGANI`).
///
/// Letter numbers count per document type, RW and year.
///
/// # Access Control
/// - `RwOrAdmin` - Only the RW covering the resident or an admin signs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the document request
///
/// # Returns
/// - `200 OK` - Letter signed
/// - `400 Bad Request` - Illegal transition
/// - `403 Forbidden` - Requires RW or ADMIN
/// - `404 Not Found` - Document request not found
/// - `409 Conflict` - Request changed meanwhile or letter number taken
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/documents/{id}/sign",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request id")),
    responses(
        (status = 200, description = "Letter signed", body = ApiResponse<DocumentDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Requires RW or ADMIN", body = ErrorDto),
        (status = 404, description = "Document request not found", body = ErrorDto),
        (status = 409, description = "Request changed meanwhile or letter number taken", body = ErrorDto)
    ),
)]
pub async fn sign_document(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let document = DocumentService::new(&state.db).sign(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Letter signed", document.into_dto())),
    ))
}

/// Mark a signed letter as handed over (`DITANDATANGANI` → `SELESAI`).
///
/// # Access Control
/// - `Staff` - Covering the resident's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the document request
///
/// # Returns
/// - `200 OK` - Request completed
/// - `400 Bad Request` - Illegal transition
/// - `403 Forbidden` - Requires staff covering the resident
/// - `404 Not Found` - Document request not found
/// - `409 Conflict` - Request changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/documents/{id}/complete",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request id")),
    responses(
        (status = 200, description = "Request completed", body = ApiResponse<DocumentDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Requires staff covering the resident", body = ErrorDto),
        (status = 404, description = "Document request not found", body = ErrorDto),
        (status = 409, description = "Request changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn complete_document(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let document = DocumentService::new(&state.db).complete(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Document request completed", document.into_dto())),
    ))
}

/// Reject a request that has not been signed yet (`DITOLAK`).
///
/// A reason is required and sent to the requester.
///
/// # Access Control
/// - `Staff` - Covering the resident's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the document request
/// - `payload` - Rejection reason
///
/// # Returns
/// - `200 OK` - Request rejected
/// - `400 Bad Request` - Missing reason or illegal transition
/// - `403 Forbidden` - Requires staff covering the resident
/// - `404 Not Found` - Document request not found
/// - `409 Conflict` - Request changed meanwhile
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/documents/{id}/reject",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request id")),
    request_body = RejectDocumentDto,
    responses(
        (status = 200, description = "Request rejected", body = ApiResponse<DocumentDto>),
        (status = 400, description = "Missing reason or illegal transition", body = ErrorDto),
        (status = 403, description = "Requires staff covering the resident", body = ErrorDto),
        (status = 404, description = "Document request not found", body = ErrorDto),
        (status = 409, description = "Request changed meanwhile", body = ErrorDto)
    ),
)]
pub async fn reject_document(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<RejectDocumentDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let document = DocumentService::new(&state.db)
        .reject(&current, id, payload.reason)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Document request rejected", document.into_dto())),
    ))
}

/// Withdraw an own request.
///
/// Only possible while it is still `DIAJUKAN`; a stored attachment is removed.
///
/// # Access Control
/// - Any logged-in user - Only the requester
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the document request
///
/// # Returns
/// - `200 OK` - Request withdrawn
/// - `400 Bad Request` - Request is already being handled
/// - `403 Forbidden` - Only the requester may withdraw
/// - `404 Not Found` - Document request not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = DOCUMENT_TAG,
    params(("id" = i32, Path, description = "Document request id")),
    responses(
        (status = 200, description = "Request withdrawn"),
        (status = 400, description = "Request is already being handled", body = ErrorDto),
        (status = 403, description = "Only the requester may withdraw", body = ErrorDto),
        (status = 404, description = "Document request not found", body = ErrorDto)
    ),
)]
pub async fn withdraw_document(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    DocumentService::new(&state.db)
        .withdraw(&current, &state.uploads, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Document request withdrawn")),
    ))
}
