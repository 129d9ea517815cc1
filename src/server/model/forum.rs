use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::forum::{
        CommentDto, CreatePostDto, ForumCategory, PostDetailDto, PostDto, UpdatePostDto,
    },
    server::{
        error::AppError,
        util::{parse::parse_stored, validate::Validator},
    },
};

/// Forum post visible to an RW, or to a single RT when `rt_id` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub rw: i32,
    pub rt_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub category: ForumCategory,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post joined with its author's name and engagement counts.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post: Post,
    pub author_name: String,
    pub like_count: u64,
    pub comment_count: u64,
}

impl PostSummary {
    pub fn into_dto(self) -> PostDto {
        PostDto {
            id: self.post.id,
            author_id: self.post.author_id,
            author_name: self.author_name,
            rw: self.post.rw,
            rt_id: self.post.rt_id,
            title: self.post.title,
            content: self.post.content,
            category: self.post.category,
            is_pinned: self.post.is_pinned,
            like_count: self.like_count,
            comment_count: self.comment_count,
            created_at: self.post.created_at,
            updated_at: self.post.updated_at,
        }
    }
}

/// Post with its comments and whether the viewing user liked it.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub summary: PostSummary,
    pub liked_by_me: bool,
    pub comments: Vec<CommentView>,
}

impl PostDetail {
    pub fn into_dto(self) -> PostDetailDto {
        PostDetailDto {
            post: self.summary.into_dto(),
            liked_by_me: self.liked_by_me,
            comments: self.comments.into_iter().map(CommentView::into_dto).collect(),
        }
    }
}

impl Post {
    pub fn from_entity(entity: entity::forum_post::Model) -> Result<Self, DbErr> {
        Ok(Self {
            category: parse_stored("forum_post.category", &entity.category)?,
            id: entity.id,
            author_id: entity.author_id,
            rw: entity.rw,
            rt_id: entity.rt_id,
            title: entity.title,
            content: entity.content,
            is_pinned: entity.is_pinned,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub author_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn into_dto(self, author_name: String) -> CommentDto {
        CommentDto {
            id: self.id,
            post_id: self.post_id,
            author_id: self.author_id,
            author_name,
            content: self.content,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::forum_comment::Model) -> Self {
        Self {
            id: entity.id,
            post_id: entity.post_id,
            author_id: entity.author_id,
            content: entity.content,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentView {
    pub comment: Comment,
    pub author_name: String,
}

impl CommentView {
    pub fn into_dto(self) -> CommentDto {
        self.comment.into_dto(self.author_name)
    }
}

#[derive(Debug, Clone)]
pub struct PostParams {
    pub title: String,
    pub content: String,
    pub category: ForumCategory,
}

impl PostParams {
    pub fn from_create_dto(dto: &CreatePostDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            content: dto.content.trim().to_string(),
            category: dto.category,
        }
    }

    pub fn from_update_dto(dto: UpdatePostDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            content: dto.content.trim().to_string(),
            category: dto.category,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .required("title", &self.title)
            .length("title", &self.title, 3, 200)
            .required("content", &self.content)
            .length("content", &self.content, 1, 10_000)
            .finish()
    }
}

pub fn validate_comment(content: &str) -> Result<(), AppError> {
    Validator::new()
        .required("content", content)
        .length("content", content, 1, 2000)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_validates_post() {
        let params = PostParams::from_create_dto(&CreatePostDto {
            title: "  Jual sepeda  ".to_string(),
            content: "Masih bagus".to_string(),
            category: ForumCategory::Marketplace,
            rt_only: false,
        });

        assert_eq!(params.title, "Jual sepeda");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_blank_comment() {
        assert!(matches!(
            validate_comment("   "),
            Err(AppError::Validation(_))
        ));
    }
}
