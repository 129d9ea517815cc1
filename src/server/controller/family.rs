use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use super::PaginationQuery;
use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        family::{
            AddFamilyMemberDto, CreateFamilyDto, FamilyDetailDto, FamilyDto, UpdateFamilyDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::family::{AddMemberParams, CreateFamilyParams, UpdateFamilyParams},
        service::family::FamilyService,
        state::AppState,
        util::extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Tag for grouping family endpoints in OpenAPI documentation
pub static FAMILY_TAG: &str = "family";

/// List families within the user's territory.
///
/// # Access Control
/// - `Staff` - Families of the territory they manage
/// - `WARGA` - Their own family
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination parameters
///
/// # Returns
/// - `200 OK` - Page of families
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/families",
    tag = FAMILY_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of families", body = ApiResponse<PageDto<FamilyDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_families(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let families = FamilyService::new(&state.db)
        .get_paginated(&current, query.page_request())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Families",
            families.into_dto(|f| f.into_dto()),
        )),
    ))
}

/// Get a family with its members.
///
/// # Access Control
/// - `Staff` - Families of the territory they manage
/// - `WARGA` - Their own family
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the family
///
/// # Returns
/// - `200 OK` - Family with members
/// - `403 Forbidden` - Family outside the user's territory
/// - `404 Not Found` - Family not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/families/{id}",
    tag = FAMILY_TAG,
    params(("id" = i32, Path, description = "Family id")),
    responses(
        (status = 200, description = "Family with members", body = ApiResponse<FamilyDetailDto>),
        (status = 403, description = "Family outside the user's territory", body = ErrorDto),
        (status = 404, description = "Family not found", body = ErrorDto)
    ),
)]
pub async fn get_family(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let family = FamilyService::new(&state.db).get_by_id(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Family", family.into_dto())),
    ))
}

/// Create a family card (KK), optionally with its head.
///
/// The KK number must be 16 digits and unique; the head must live in the same RT and not
/// belong to another family.
///
/// # Access Control
/// - `Staff` - Managing the family's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - KK number, RT, address and optional head
///
/// # Returns
/// - `201 Created` - Family created
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - RT outside the user's territory
/// - `409 Conflict` - KK number already registered
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/families",
    tag = FAMILY_TAG,
    request_body = CreateFamilyDto,
    responses(
        (status = 201, description = "Family created", body = ApiResponse<FamilyDetailDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "RT outside the user's territory", body = ErrorDto),
        (status = 409, description = "KK number already registered", body = ErrorDto)
    ),
)]
pub async fn create_family(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CreateFamilyDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff, Permission::ManageRt(payload.rt_id)])
        .await?;

    let family = FamilyService::new(&state.db)
        .create(&current, CreateFamilyParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Family created", family.into_dto())),
    ))
}

/// Update a family's KK number and address.
///
/// # Access Control
/// - `Staff` - Managing the family's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the family
/// - `payload` - KK number and address
///
/// # Returns
/// - `200 OK` - Family updated
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Family outside the user's territory
/// - `404 Not Found` - Family not found
/// - `409 Conflict` - KK number already registered
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/families/{id}",
    tag = FAMILY_TAG,
    params(("id" = i32, Path, description = "Family id")),
    request_body = UpdateFamilyDto,
    responses(
        (status = 200, description = "Family updated", body = ApiResponse<FamilyDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Family outside the user's territory", body = ErrorDto),
        (status = 404, description = "Family not found", body = ErrorDto),
        (status = 409, description = "KK number already registered", body = ErrorDto)
    ),
)]
pub async fn update_family(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateFamilyDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let family = FamilyService::new(&state.db)
        .update(&current, id, UpdateFamilyParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Family updated", family.into_dto())),
    ))
}

/// Deactivate a family.
///
/// Members stay registered without a family.
///
/// # Access Control
/// - `Staff` - Managing the family's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the family
///
/// # Returns
/// - `200 OK` - Family deactivated
/// - `403 Forbidden` - Family outside the user's territory
/// - `404 Not Found` - Family not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/families/{id}",
    tag = FAMILY_TAG,
    params(("id" = i32, Path, description = "Family id")),
    responses(
        (status = 200, description = "Family deactivated"),
        (status = 403, description = "Family outside the user's territory", body = ErrorDto),
        (status = 404, description = "Family not found", body = ErrorDto)
    ),
)]
pub async fn delete_family(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    FamilyService::new(&state.db).delete(&current, id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("Family deactivated"))))
}

/// Add a resident of the same RT to the family.
///
/// Adding with role `KEPALA_KELUARGA` makes the resident the family head.
///
/// # Access Control
/// - `Staff` - Managing the family's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the family
/// - `payload` - Resident id and family role
///
/// # Returns
/// - `200 OK` - Member added
/// - `400 Bad Request` - Resident lives in another RT
/// - `403 Forbidden` - Family outside the user's territory
/// - `404 Not Found` - Family or resident not found
/// - `409 Conflict` - Resident belongs to another family
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/families/{id}/members",
    tag = FAMILY_TAG,
    params(("id" = i32, Path, description = "Family id")),
    request_body = AddFamilyMemberDto,
    responses(
        (status = 200, description = "Member added", body = ApiResponse<FamilyDetailDto>),
        (status = 400, description = "Resident lives in another RT", body = ErrorDto),
        (status = 403, description = "Family outside the user's territory", body = ErrorDto),
        (status = 404, description = "Family or resident not found", body = ErrorDto),
        (status = 409, description = "Resident belongs to another family", body = ErrorDto)
    ),
)]
pub async fn add_family_member(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<AddFamilyMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let family = FamilyService::new(&state.db)
        .add_member(&current, id, AddMemberParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Member added", family.into_dto())),
    ))
}

/// Remove a resident from the family.
///
/// Removing the head leaves the family without one.
///
/// # Access Control
/// - `Staff` - Managing the family's RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the family
/// - `resident_id` - ID of the resident to remove
///
/// # Returns
/// - `200 OK` - Member removed
/// - `403 Forbidden` - Family outside the user's territory
/// - `404 Not Found` - Family not found or resident not a member
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/families/{id}/members/{resident_id}",
    tag = FAMILY_TAG,
    params(
        ("id" = i32, Path, description = "Family id"),
        ("resident_id" = i32, Path, description = "Resident id")
    ),
    responses(
        (status = 200, description = "Member removed", body = ApiResponse<FamilyDetailDto>),
        (status = 403, description = "Family outside the user's territory", body = ErrorDto),
        (status = 404, description = "Family not found or resident not a member", body = ErrorDto)
    ),
)]
pub async fn remove_family_member(
    State(state): State<AppState>,
    session: Session,
    ApiPath((id, resident_id)): ApiPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let family = FamilyService::new(&state.db)
        .remove_member(&current, id, resident_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Member removed", family.into_dto())),
    ))
}
