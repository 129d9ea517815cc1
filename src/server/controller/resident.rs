use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        resident::{ResidentDto, ResidentInputDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::PageRequest,
            resident::{ResidentParams, ResidentQuery},
        },
        service::resident::ResidentService,
        state::AppState,
        util::extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Tag for grouping resident endpoints in OpenAPI documentation
pub static RESIDENT_TAG: &str = "resident";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResidentListQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
    /// Name substring or NIK prefix.
    pub search: Option<String>,
    pub rt_id: Option<i32>,
}

/// List residents within the user's territory.
///
/// Searchable by name or NIK prefix and filterable by RT.
///
/// # Access Control
/// - `Staff` - Residents of the territory they manage
/// - `WARGA` - Themselves and their family members
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination, search text and optional RT filter
///
/// # Returns
/// - `200 OK` - Page of residents
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/residents",
    tag = RESIDENT_TAG,
    params(ResidentListQuery),
    responses(
        (status = 200, description = "Page of residents", body = ApiResponse<PageDto<ResidentDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_residents(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<ResidentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let residents = ResidentService::new(&state.db)
        .get_paginated(
            &current,
            ResidentQuery {
                page: PageRequest::new(query.page, query.per_page),
                search: query
                    .search
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                rt_id: query.rt_id,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Residents",
            residents.into_dto(|r| r.into_dto()),
        )),
    ))
}

/// Get one resident.
///
/// # Access Control
/// - `Staff` - Residents of the territory they manage
/// - `WARGA` - Themselves and their family members
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the resident
///
/// # Returns
/// - `200 OK` - Resident
/// - `403 Forbidden` - Resident outside the user's territory
/// - `404 Not Found` - Resident not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/residents/{id}",
    tag = RESIDENT_TAG,
    params(("id" = i32, Path, description = "Resident id")),
    responses(
        (status = 200, description = "Resident", body = ApiResponse<ResidentDto>),
        (status = 403, description = "Resident outside the user's territory", body = ErrorDto),
        (status = 404, description = "Resident not found", body = ErrorDto)
    ),
)]
pub async fn get_resident(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let resident = ResidentService::new(&state.db)
        .get_by_id(&current, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Resident", resident.into_dto())),
    ))
}

/// Register a resident.
///
/// The NIK must be 16 digits and unique.
///
/// # Access Control
/// - `Staff` - ADMIN anywhere, RW within its RW, RT only into its own RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Resident identity and address data
///
/// # Returns
/// - `201 Created` - Resident registered
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - RT outside the user's territory
/// - `409 Conflict` - NIK already registered
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/residents",
    tag = RESIDENT_TAG,
    request_body = ResidentInputDto,
    responses(
        (status = 201, description = "Resident registered", body = ApiResponse<ResidentDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "RT outside the user's territory", body = ErrorDto),
        (status = 409, description = "NIK already registered", body = ErrorDto)
    ),
)]
pub async fn create_resident(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<ResidentInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff, Permission::ManageRt(payload.rt_id)])
        .await?;

    let resident = ResidentService::new(&state.db)
        .create(&current, ResidentParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Resident registered", resident.into_dto())),
    ))
}

/// Update a resident.
///
/// Moving to another RT requires managing both RTs and that the resident is not in a
/// family. Linked accounts follow the resident to the new RT.
///
/// # Access Control
/// - `Staff` - Covering the resident's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the resident
/// - `payload` - Full resident data
///
/// # Returns
/// - `200 OK` - Resident updated
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Resident outside the user's territory
/// - `404 Not Found` - Resident not found
/// - `409 Conflict` - NIK already registered
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/residents/{id}",
    tag = RESIDENT_TAG,
    params(("id" = i32, Path, description = "Resident id")),
    request_body = ResidentInputDto,
    responses(
        (status = 200, description = "Resident updated", body = ApiResponse<ResidentDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Resident outside the user's territory", body = ErrorDto),
        (status = 404, description = "Resident not found", body = ErrorDto),
        (status = 409, description = "NIK already registered", body = ErrorDto)
    ),
)]
pub async fn update_resident(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ResidentInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let resident = ResidentService::new(&state.db)
        .update(&current, id, ResidentParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Resident updated", resident.into_dto())),
    ))
}

/// Deactivate a resident.
///
/// A family headed by the resident is left without a head.
///
/// # Access Control
/// - `Staff` - Covering the resident's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the resident
///
/// # Returns
/// - `200 OK` - Resident deactivated
/// - `403 Forbidden` - Resident outside the user's territory
/// - `404 Not Found` - Resident not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/residents/{id}",
    tag = RESIDENT_TAG,
    params(("id" = i32, Path, description = "Resident id")),
    responses(
        (status = 200, description = "Resident deactivated"),
        (status = 403, description = "Resident outside the user's territory", body = ErrorDto),
        (status = 404, description = "Resident not found", body = ErrorDto)
    ),
)]
pub async fn delete_resident(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    ResidentService::new(&state.db).delete(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Resident deactivated")),
    ))
}
