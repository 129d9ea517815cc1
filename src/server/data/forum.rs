//! Forum posts, comments and likes.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};

use crate::{
    model::forum::ForumCategory,
    server::{
        data::territory,
        model::{
            forum::{Comment, Post, PostParams},
            page::{PageRequest, Paginated},
            scope::Scope,
        },
    },
};

pub struct PostRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: PostParams,
        author_id: i32,
        rw: i32,
        rt_id: Option<i32>,
    ) -> Result<Post, DbErr> {
        let now = Utc::now();
        let entity = entity::forum_post::ActiveModel {
            author_id: ActiveValue::Set(author_id),
            rw: ActiveValue::Set(rw),
            rt_id: ActiveValue::Set(rt_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            category: ActiveValue::Set(params.category.to_string()),
            is_pinned: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Post::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Post>, DbErr> {
        entity::prelude::ForumPost::find_by_id(id)
            .filter(entity::forum_post::Column::IsActive.eq(true))
            .one(self.db)
            .await?
            .map(Post::from_entity)
            .transpose()
    }

    /// Active posts visible to `scope`, pinned first then newest.
    pub async fn get_paginated(
        &self,
        page: PageRequest,
        category: Option<ForumCategory>,
        scope: &Scope,
    ) -> Result<Paginated<Post>, DbErr> {
        let paginator = entity::prelude::ForumPost::find()
            .filter(entity::forum_post::Column::IsActive.eq(true))
            .filter(territory::area(
                scope,
                entity::forum_post::Column::Rw,
                entity::forum_post::Column::RtId,
            ))
            .apply_if(category, |select, category| {
                select.filter(entity::forum_post::Column::Category.eq(category.as_str()))
            })
            .order_by_desc(entity::forum_post::Column::IsPinned)
            .order_by_desc(entity::forum_post::Column::CreatedAt)
            .order_by_desc(entity::forum_post::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let posts = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Post::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(posts, total, page))
    }

    pub async fn update(&self, id: i32, params: PostParams) -> Result<Option<Post>, DbErr> {
        let Some(entity) = entity::prelude::ForumPost::find_by_id(id)
            .filter(entity::forum_post::Column::IsActive.eq(true))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::forum_post::ActiveModel = entity.into();
        active_model.title = ActiveValue::Set(params.title);
        active_model.content = ActiveValue::Set(params.content);
        active_model.category = ActiveValue::Set(params.category.to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;
        Post::from_entity(entity).map(Some)
    }

    pub async fn set_pinned(&self, id: i32, pinned: bool) -> Result<(), DbErr> {
        entity::prelude::ForumPost::update_many()
            .filter(entity::forum_post::Column::Id.eq(id))
            .col_expr(
                entity::forum_post::Column::IsPinned,
                sea_orm::sea_query::Expr::value(pinned),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ForumPost::update_many()
            .filter(entity::forum_post::Column::Id.eq(id))
            .filter(entity::forum_post::Column::IsActive.eq(true))
            .col_expr(
                entity::forum_post::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Active comment counts per post; posts without comments are absent.
    pub async fn comment_counts(&self, post_ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<i32> = entity::prelude::ForumComment::find()
            .select_only()
            .column(entity::forum_comment::Column::PostId)
            .filter(entity::forum_comment::Column::PostId.is_in(post_ids.to_vec()))
            .filter(entity::forum_comment::Column::IsActive.eq(true))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(tally(rows))
    }

    /// Like counts per post; posts without likes are absent.
    pub async fn like_counts(&self, post_ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<i32> = entity::prelude::ForumLike::find()
            .select_only()
            .column(entity::forum_like::Column::PostId)
            .filter(entity::forum_like::Column::PostId.is_in(post_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(tally(rows))
    }
}

fn tally(ids: Vec<i32>) -> HashMap<i32, u64> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

pub struct CommentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        post_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<Comment, DbErr> {
        let entity = entity::forum_comment::ActiveModel {
            post_id: ActiveValue::Set(post_id),
            author_id: ActiveValue::Set(author_id),
            content: ActiveValue::Set(content),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Comment::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, DbErr> {
        let entity = entity::prelude::ForumComment::find_by_id(id)
            .filter(entity::forum_comment::Column::IsActive.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(Comment::from_entity))
    }

    /// Active comments of a post, oldest first.
    pub async fn get_by_post(&self, post_id: i32) -> Result<Vec<Comment>, DbErr> {
        let entities = entity::prelude::ForumComment::find()
            .filter(entity::forum_comment::Column::PostId.eq(post_id))
            .filter(entity::forum_comment::Column::IsActive.eq(true))
            .order_by_asc(entity::forum_comment::Column::CreatedAt)
            .order_by_asc(entity::forum_comment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Comment::from_entity).collect())
    }

    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ForumComment::update_many()
            .filter(entity::forum_comment::Column::Id.eq(id))
            .filter(entity::forum_comment::Column::IsActive.eq(true))
            .col_expr(
                entity::forum_comment::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

pub struct LikeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LikeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists(&self, post_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::ForumLike::find()
            .filter(entity::forum_like::Column::PostId.eq(post_id))
            .filter(entity::forum_like::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Likes the post, or removes the like when one exists.
    ///
    /// # Returns
    /// - `Ok(true)` - The post is now liked by the user
    /// - `Ok(false)` - The like was removed
    pub async fn toggle(&self, post_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let removed = entity::prelude::ForumLike::delete_many()
            .filter(entity::forum_like::Column::PostId.eq(post_id))
            .filter(entity::forum_like::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        if removed.rows_affected > 0 {
            return Ok(false);
        }

        entity::forum_like::ActiveModel {
            post_id: ActiveValue::Set(post_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;
        Ok(true)
    }

    pub async fn count(&self, post_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ForumLike::find()
            .filter(entity::forum_like::Column::PostId.eq(post_id))
            .count(self.db)
            .await
    }
}
