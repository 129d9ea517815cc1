use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{ChangePasswordDto, LoginDto, RegisterDto, SetupAdminDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::user::{ChangePasswordParams, RegisterParams, SetupAdminParams},
        service::auth::AuthService,
        state::AppState,
        util::extract::ApiJson,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Log in with username and password.
///
/// Verifies the credentials, cycles the session id and stores the user id in the session
/// cookie. Unknown usernames, wrong passwords and deactivated accounts get the same error.
///
/// # Access Control
/// - Public - No session required
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Username and password
///
/// # Returns
/// - `200 OK` - Logged in
/// - `401 Unauthorized` - Invalid username or password
/// - `500 Internal Server Error` - Internal server error
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<UserDto>),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .login(&payload.username, &payload.password)
        .await?;

    AuthSession::new(&session).login(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Logged in", user.into_dto())),
    ))
}

/// Log out and delete the session.
///
/// Flushes the session record so the cookie no longer authenticates. Succeeds for anonymous
/// sessions too.
///
/// # Access Control
/// - Public - No session required
///
/// # Arguments
/// - `session` - User's session for authentication
///
/// # Returns
/// - `200 OK` - Logged out
/// - `500 Internal Server Error` - Internal server error
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("Logged out"))))
}

/// Get the logged-in user.
///
/// Loads the account fresh from the database, so role or territory changes show up without
/// logging in again.
///
/// # Access Control
/// - Any logged-in user
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
///
/// # Returns
/// - `200 OK` - Current user
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Current user", current.user.into_dto())),
    ))
}

/// Change the logged-in user's password.
///
/// The current password must be supplied and correct; the session stays valid afterwards.
///
/// # Access Control
/// - Any logged-in user - Only their own password
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Current and new password
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Wrong current password or invalid new password
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Wrong current password or invalid new password", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    AuthService::new(&state.db)
        .change_password(&current.user, ChangePasswordParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("Password changed"))))
}

/// Register a WARGA account for an existing resident.
///
/// The NIK must belong to an active resident that has no account yet. The account takes the
/// RT and RW of the resident and is not logged in automatically.
///
/// # Access Control
/// - Public - No session required
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `payload` - Username, password, display name and NIK
///
/// # Returns
/// - `201 Created` - Account created
/// - `400 Bad Request` - Invalid fields
/// - `404 Not Found` - No resident with that NIK
/// - `409 Conflict` - Username taken or resident already registered
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 404, description = "No resident with that NIK", body = ErrorDto),
        (status = 409, description = "Username taken or resident already registered", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .register(RegisterParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Account registered", user.into_dto())),
    ))
}

/// Create the first admin account with the setup code from the server log.
///
/// The code is consumed on success and the new admin is logged in.
///
/// # Access Control
/// - Public - Only while no admin exists
///
/// # Arguments
/// - `state` - Application state containing the database connection and the setup code
///   service
/// - `session` - User's session for authentication
/// - `payload` - Setup code, username, password and display name
///
/// # Returns
/// - `201 Created` - Admin created
/// - `400 Bad Request` - Invalid fields
/// - `401 Unauthorized` - Invalid or expired setup code
/// - `409 Conflict` - An admin exists already
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/auth/setup",
    tag = AUTH_TAG,
    request_body = SetupAdminDto,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 401, description = "Invalid or expired setup code", body = ErrorDto),
        (status = 409, description = "An admin exists already", body = ErrorDto)
    ),
)]
pub async fn setup_admin(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<SetupAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .setup_admin(
            &state.setup_code_service,
            SetupAdminParams::from_dto(payload),
        )
        .await?;

    AuthSession::new(&session).login(user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Admin account created", user.into_dto())),
    ))
}
