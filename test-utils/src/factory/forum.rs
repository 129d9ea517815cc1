//! Forum post, comment and like factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test forum posts.
///
/// # Example
///
/// ```rust,ignore
/// let post = PostFactory::new(&db, user.id, 1).pinned(true).build().await?;
/// ```
pub struct PostFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: i32,
    rw: i32,
    rt_id: Option<i32>,
    title: String,
    category: String,
    is_pinned: bool,
    created_at: DateTime<Utc>,
}

impl<'a> PostFactory<'a> {
    /// Creates a new PostFactory for an unpinned RW-wide `UMUM` post.
    pub fn new(db: &'a DatabaseConnection, author_id: i32, rw: i32) -> Self {
        Self {
            db,
            author_id,
            rw,
            rt_id: None,
            title: format!("Topik {}", next_id()),
            category: "UMUM".to_string(),
            is_pinned: false,
            created_at: Utc::now(),
        }
    }

    pub fn rt_id(mut self, rt_id: i32) -> Self {
        self.rt_id = Some(rt_id);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::forum_post::Model, DbErr> {
        entity::forum_post::ActiveModel {
            id: ActiveValue::NotSet,
            author_id: ActiveValue::Set(self.author_id),
            rw: ActiveValue::Set(self.rw),
            rt_id: ActiveValue::Set(self.rt_id),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set("Isi diskusi".to_string()),
            category: ActiveValue::Set(self.category),
            is_pinned: ActiveValue::Set(self.is_pinned),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_post(
    db: &DatabaseConnection,
    author_id: i32,
    rw: i32,
) -> Result<entity::forum_post::Model, DbErr> {
    PostFactory::new(db, author_id, rw).build().await
}

pub async fn create_comment(
    db: &DatabaseConnection,
    post_id: i32,
    author_id: i32,
) -> Result<entity::forum_comment::Model, DbErr> {
    entity::forum_comment::ActiveModel {
        id: ActiveValue::NotSet,
        post_id: ActiveValue::Set(post_id),
        author_id: ActiveValue::Set(author_id),
        content: ActiveValue::Set("Setuju".to_string()),
        is_active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

pub async fn create_like(
    db: &DatabaseConnection,
    post_id: i32,
    user_id: i32,
) -> Result<entity::forum_like::Model, DbErr> {
    entity::forum_like::ActiveModel {
        id: ActiveValue::NotSet,
        post_id: ActiveValue::Set(post_id),
        user_id: ActiveValue::Set(user_id),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
