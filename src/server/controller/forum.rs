use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageDto},
        forum::{
            CommentDto, CreateCommentDto, CreatePostDto, ForumCategory, LikeStatusDto,
            PostDetailDto, PostDto, UpdatePostDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{forum::PostParams, page::PageRequest},
        service::forum::ForumService,
        state::AppState,
        util::extract::{ApiJson, ApiPath, ApiQuery},
    },
};

/// Tag for grouping forum endpoints in OpenAPI documentation
pub static FORUM_TAG: &str = "forum";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostListQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
    pub category: Option<ForumCategory>,
}

/// List posts of the user's RW.
///
/// Pinned posts first, then newest; optionally filtered by category.
///
/// # Access Control
/// - Any logged-in user - Posts of their RW, RT-only posts of their RT
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `query` - Pagination and optional category filter
///
/// # Returns
/// - `200 OK` - Page of posts
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/forum/posts",
    tag = FORUM_TAG,
    params(PostListQuery),
    responses(
        (status = 200, description = "Page of posts", body = ApiResponse<PageDto<PostDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_posts(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<PostListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let posts = ForumService::new(&state.db)
        .get_paginated(
            &current,
            PageRequest::new(query.page, query.per_page),
            query.category,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Posts", posts.into_dto(|p| p.into_dto()))),
    ))
}

/// Get a post with its comments, like count and whether the user liked it.
///
/// # Access Control
/// - Any logged-in user who can see the post
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the post
///
/// # Returns
/// - `200 OK` - Post with comments
/// - `403 Forbidden` - Post outside the user's area
/// - `404 Not Found` - Post not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/forum/posts/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with comments", body = ApiResponse<PostDetailDto>),
        (status = 403, description = "Post outside the user's area", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn get_post(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let post = ForumService::new(&state.db).get_by_id(&current, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post", post.into_dto())),
    ))
}

/// Publish a post in the author's RW, or only their RT with `rt_only`.
///
/// Announcements (`PENGUMUMAN`) are reserved for staff.
///
/// # Access Control
/// - Any logged-in user with a home RW
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Title, content, category and RT-only flag
///
/// # Returns
/// - `201 Created` - Post published
/// - `400 Bad Request` - Invalid fields or no home RW
/// - `403 Forbidden` - Announcements require staff
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/forum/posts",
    tag = FORUM_TAG,
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post published", body = ApiResponse<PostDetailDto>),
        (status = 400, description = "Invalid fields or no home RW", body = ErrorDto),
        (status = 403, description = "Announcements require staff", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CreatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let post = ForumService::new(&state.db)
        .create(&current, PostParams::from_create_dto(&payload), payload.rt_only)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Post published", post.into_dto())),
    ))
}

/// Edit a post.
///
/// # Access Control
/// - Any logged-in user - Only the author
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the post
/// - `payload` - Title, content and category
///
/// # Returns
/// - `200 OK` - Post updated
/// - `400 Bad Request` - Invalid fields
/// - `403 Forbidden` - Only the author edits a post
/// - `404 Not Found` - Post not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/forum/posts/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<PostDetailDto>),
        (status = 400, description = "Invalid fields", body = ErrorDto),
        (status = 403, description = "Only the author edits a post", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn update_post(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let post = ForumService::new(&state.db)
        .update(&current, id, PostParams::from_update_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post updated", post.into_dto())),
    ))
}

/// Remove a post from the forum.
///
/// The post is deactivated and no longer listed.
///
/// # Access Control
/// - Any logged-in user - The author
/// - `Staff` - Moderating the post's area
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the post
///
/// # Returns
/// - `200 OK` - Post removed
/// - `403 Forbidden` - Neither author nor moderating staff
/// - `404 Not Found` - Post not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/forum/posts/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post removed"),
        (status = 403, description = "Neither author nor moderating staff", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn delete_post(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ForumService::new(&state.db).delete(&current, id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("Post removed"))))
}

/// Toggle the pinned flag of a post.
///
/// # Access Control
/// - `Staff` - Moderating the post's area
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the post
///
/// # Returns
/// - `200 OK` - Pin toggled
/// - `403 Forbidden` - Requires moderating staff
/// - `404 Not Found` - Post not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/forum/posts/{id}/pin",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Pin toggled", body = ApiResponse<PostDetailDto>),
        (status = 403, description = "Requires moderating staff", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn toggle_pin(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let post = ForumService::new(&state.db).toggle_pin(&current, id).await?;
    let message = if post.summary.post.is_pinned {
        "Post pinned"
    } else {
        "Post unpinned"
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(message, post.into_dto())),
    ))
}

/// Comment on a post.
///
/// The post author is notified unless commenting on their own post.
///
/// # Access Control
/// - Any logged-in user who can see the post
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the post
/// - `payload` - Comment text
///
/// # Returns
/// - `201 Created` - Comment added
/// - `400 Bad Request` - Empty or too long comment
/// - `403 Forbidden` - Post outside the user's area
/// - `404 Not Found` - Post not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/forum/posts/{id}/comments",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<CommentDto>),
        (status = 400, description = "Empty or too long comment", body = ErrorDto),
        (status = 403, description = "Post outside the user's area", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn add_comment(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CreateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let comment = ForumService::new(&state.db)
        .add_comment(&current, id, payload.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Comment added", comment.into_dto())),
    ))
}

/// Delete a comment.
///
/// # Access Control
/// - Any logged-in user - The comment's author
/// - `Staff` - Moderating the post's area
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the comment
///
/// # Returns
/// - `200 OK` - Comment removed
/// - `403 Forbidden` - Neither author nor moderating staff
/// - `404 Not Found` - Comment not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    delete,
    path = "/api/forum/comments/{id}",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment removed"),
        (status = 403, description = "Neither author nor moderating staff", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto)
    ),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ForumService::new(&state.db)
        .delete_comment(&current, id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("Comment removed"))))
}

/// Like or unlike a post.
///
/// Returns the new like state and count.
///
/// # Access Control
/// - Any logged-in user who can see the post
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `id` - ID of the post
///
/// # Returns
/// - `200 OK` - Like toggled
/// - `403 Forbidden` - Post outside the user's area
/// - `404 Not Found` - Post not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/forum/posts/{id}/like",
    tag = FORUM_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<LikeStatusDto>),
        (status = 403, description = "Post outside the user's area", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let current = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let (liked, like_count) = ForumService::new(&state.db)
        .toggle_like(&current, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Like toggled",
            LikeStatusDto { liked, like_count },
        )),
    ))
}
