use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        rt::{CreateRtDto, RtDto, RtSummaryDto, UpdateRtDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::rt::{CreateRtParams, UpdateRtParams},
        service::rt::RtService,
        state::AppState,
        util::extract::{ApiJson, ApiPath},
    },
};

/// Tag for grouping RT endpoints in OpenAPI documentation
pub static RT_TAG: &str = "rt";

/// List active RTs.
///
/// # Access Control
/// - `Admin` - Every RT
/// - Any other logged-in user - RTs of their RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
///
/// # Returns
/// - `200 OK` - RTs
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/rt",
    tag = RT_TAG,
    responses(
        (status = 200, description = "RTs", body = ApiResponse<Vec<RtDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_rts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let rts = RtService::new(&state.db).get_all(&current).await?;
    let rts: Vec<RtDto> = rts.into_iter().map(|rt| rt.into_dto()).collect();

    Ok((StatusCode::OK, Json(ApiResponse::success("RTs", rts))))
}

/// Get one RT.
///
/// # Access Control
/// - `Admin` - Any RT
/// - Any other logged-in user - RTs of their RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the RT
///
/// # Returns
/// - `200 OK` - RT
/// - `403 Forbidden` - RT belongs to another RW
/// - `404 Not Found` - RT not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/rt/{id}",
    tag = RT_TAG,
    params(("id" = i32, Path, description = "RT id")),
    responses(
        (status = 200, description = "RT", body = ApiResponse<RtDto>),
        (status = 403, description = "RT belongs to another RW", body = ErrorDto),
        (status = 404, description = "RT not found", body = ErrorDto)
    ),
)]
pub async fn get_rt(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let rt = RtService::new(&state.db).get_by_id(&current, id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success("RT", rt.into_dto()))))
}

/// Create an RT.
///
/// The number must be unique within the RW.
///
/// # Access Control
/// - `Admin` - Any RW
/// - `RW` - Only its own RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - RT number, RW and optional chairman details
///
/// # Returns
/// - `201 Created` - RT created
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Requires ADMIN or the RW itself
/// - `409 Conflict` - Number already used in the RW
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/rt",
    tag = RT_TAG,
    request_body = CreateRtDto,
    responses(
        (status = 201, description = "RT created", body = ApiResponse<RtDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Requires ADMIN or the RW itself", body = ErrorDto),
        (status = 409, description = "Number already used in the RW", body = ErrorDto)
    ),
)]
pub async fn create_rt(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CreateRtDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let rt = RtService::new(&state.db)
        .create(&current, CreateRtParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("RT created", rt.into_dto())),
    ))
}

/// Update an RT's number and chairman details.
///
/// An RT cannot move to another RW.
///
/// # Access Control
/// - `Admin` - Any RT
/// - `RW` - RTs of its own RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the RT
/// - `payload` - New number and chairman details
///
/// # Returns
/// - `200 OK` - RT updated
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - RT outside the user's RW
/// - `404 Not Found` - RT not found
/// - `409 Conflict` - Number already used in the RW
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/rt/{id}",
    tag = RT_TAG,
    params(("id" = i32, Path, description = "RT id")),
    request_body = UpdateRtDto,
    responses(
        (status = 200, description = "RT updated", body = ApiResponse<RtDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "RT outside the user's RW", body = ErrorDto),
        (status = 404, description = "RT not found", body = ErrorDto),
        (status = 409, description = "Number already used in the RW", body = ErrorDto)
    ),
)]
pub async fn update_rt(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateRtDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    let rt = RtService::new(&state.db)
        .update(&current, id, UpdateRtParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("RT updated", rt.into_dto())),
    ))
}

/// Deactivate an RT.
///
/// Refused while the RT still has active residents or families.
///
/// # Access Control
/// - `Admin` - Only admins deactivate RTs
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the RT
///
/// # Returns
/// - `200 OK` - RT deactivated
/// - `400 Bad Request` - RT still has active residents
/// - `403 Forbidden` - Requires ADMIN
/// - `404 Not Found` - RT not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/rt/{id}",
    tag = RT_TAG,
    params(("id" = i32, Path, description = "RT id")),
    responses(
        (status = 200, description = "RT deactivated"),
        (status = 400, description = "RT still has active residents", body = ErrorDto),
        (status = 403, description = "Requires ADMIN", body = ErrorDto),
        (status = 404, description = "RT not found", body = ErrorDto)
    ),
)]
pub async fn delete_rt(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    RtService::new(&state.db).delete(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("RT deactivated"))))
}

/// Get dashboard counts for an RT.
///
/// Counts active residents and families, pending document requests and open complaints.
///
/// # Access Control
/// - `Staff` - ADMIN, RW of the RT's RW, or the RT's own staff
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the RT
///
/// # Returns
/// - `200 OK` - RT summary
/// - `403 Forbidden` - RT outside the user's territory
/// - `404 Not Found` - RT not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/rt/{id}/summary",
    tag = RT_TAG,
    params(("id" = i32, Path, description = "RT id")),
    responses(
        (status = 200, description = "RT summary", body = ApiResponse<RtSummaryDto>),
        (status = 403, description = "RT outside the user's territory", body = ErrorDto),
        (status = 404, description = "RT not found", body = ErrorDto)
    ),
)]
pub async fn get_rt_summary(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let summary = RtService::new(&state.db).summary(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("RT summary", summary.into_dto())),
    ))
}
