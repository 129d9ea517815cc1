use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

db_enum! {
    ForumCategory {
        General => "UMUM",
        Announcement => "PENGUMUMAN",
        Discussion => "DISKUSI",
        Marketplace => "JUAL_BELI",
        LostAndFound => "KEHILANGAN",
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct PostDto {
    pub id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub rw: i32,
    pub rt_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub category: ForumCategory,
    pub is_pinned: bool,
    pub like_count: u64,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct PostDetailDto {
    #[serde(flatten)]
    pub post: PostDto,
    pub liked_by_me: bool,
    pub comments: Vec<CommentDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CommentDto {
    pub id: i32,
    pub post_id: i32,
    pub author_id: i32,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreatePostDto {
    pub title: String,
    pub content: String,
    pub category: ForumCategory,
    /// Restrict the post to the author's RT instead of the whole RW.
    #[serde(default)]
    pub rt_only: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdatePostDto {
    pub title: String,
    pub content: String,
    pub category: ForumCategory,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateCommentDto {
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LikeStatusDto {
    pub liked: bool,
    pub like_count: u64,
}
