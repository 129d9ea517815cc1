use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        user::{CreateUserDto, Role, UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            page::PageRequest,
            user::{CreateUserParams, UpdateUserParams, UserQuery},
        },
        service::user::UserService,
        state::AppState,
        util::extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Tag for grouping user management endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
    pub role: Option<Role>,
}

/// List active accounts.
///
/// Paginated, optionally filtered by role.
///
/// # Access Control
/// - `Admin` - All accounts
/// - `RW` - Accounts of its RW only
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination and optional role filter
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Requires ADMIN or RW
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<PageDto<UserDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Requires ADMIN or RW", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let users = UserService::new(&state.db)
        .get_paginated(
            &current,
            UserQuery {
                page: PageRequest::new(query.page, query.per_page),
                role: query.role,
                rw: None,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Users", users.into_dto(|u| u.into_dto()))),
    ))
}

/// Create an account of any role.
///
/// RT accounts require `rt_id` and take the RW of that RT; RW accounts require `rw`. WARGA
/// accounts may be linked to a resident with `resident_id`.
///
/// # Access Control
/// - `Admin` - Only admins create accounts
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Username, password, name and role assignment
///
/// # Returns
/// - `201 Created` - Account created
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Requires ADMIN
/// - `409 Conflict` - Username taken or resident already linked
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Requires ADMIN", body = ErrorDto),
        (status = 409, description = "Username taken or resident already linked", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .create(CreateUserParams::from_dto(payload))
        .await?;

    tracing::info!("Admin {} created user {}", current.id(), user.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User created", user.into_dto())),
    ))
}

/// Update the name and role assignment of an account.
///
/// The role assignment is resolved the same way as on creation.
///
/// # Access Control
/// - `Admin` - Only admins manage accounts
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the account
/// - `payload` - Name and role assignment
///
/// # Returns
/// - `200 OK` - Account updated
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Requires ADMIN
/// - `404 Not Found` - User not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Requires ADMIN", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .update(id, UpdateUserParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("User updated", user.into_dto())),
    ))
}

/// Deactivate an account.
///
/// The account can no longer log in and disappears from listings. Admins cannot deactivate
/// themselves.
///
/// # Access Control
/// - `Admin` - Only admins manage accounts
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the account
///
/// # Returns
/// - `200 OK` - Account deactivated
/// - `400 Bad Request` - Tried to deactivate own account
/// - `403 Forbidden` - Requires ADMIN
/// - `404 Not Found` - User not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Account deactivated"),
        (status = 400, description = "Tried to deactivate own account", body = ErrorDto),
        (status = 403, description = "Requires ADMIN", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db).deactivate(&current, id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("User deactivated"))))
}
