use sea_orm::DatabaseConnection;

use crate::{
    model::{forum::ForumCategory, notification::NotificationKind},
    server::{
        data::{
            forum::{CommentRepository, LikeRepository, PostRepository},
            user::UserRepository,
        },
        error::AppError,
        model::{
            forum::{validate_comment, CommentView, Post, PostDetail, PostParams, PostSummary},
            notification::NewNotification,
            page::{PageRequest, Paginated},
            scope::{Scope, Territory},
            user::CurrentUser,
        },
        service::notification::NotificationService,
    },
};

pub struct ForumService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ForumService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts of the user's RW and RT, pinned first then newest.
    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        page: PageRequest,
        category: Option<ForumCategory>,
    ) -> Result<Paginated<PostSummary>, AppError> {
        if current.scope == Scope::Unassigned {
            return Ok(Paginated::empty(page));
        }

        let repo = PostRepository::new(self.db);
        let posts = repo.get_paginated(page, category, &current.scope).await?;

        let post_ids: Vec<i32> = posts.items.iter().map(|p| p.id).collect();
        let author_ids: Vec<i32> = posts.items.iter().map(|p| p.author_id).collect();
        let likes = repo.like_counts(&post_ids).await?;
        let comments = repo.comment_counts(&post_ids).await?;
        let names = UserRepository::new(self.db)
            .names_by_ids(&author_ids)
            .await?;

        Ok(posts.map(|post| PostSummary {
            author_name: names.get(&post.author_id).cloned().unwrap_or_default(),
            like_count: likes.get(&post.id).copied().unwrap_or_default(),
            comment_count: comments.get(&post.id).copied().unwrap_or_default(),
            post,
        }))
    }

    pub async fn get_by_id(&self, current: &CurrentUser, id: i32) -> Result<PostDetail, AppError> {
        let post = self.find_visible(current, id).await?;

        self.detail(current, post).await
    }

    /// Publishes a post to the author's RW, or only to their RT with `rt_only`.
    ///
    /// # Returns
    /// - `Ok(PostDetail)` - Created post
    /// - `Err(AppError::BadRequest)` - Author has no home RW, or no home RT for `rt_only`
    /// - `Err(AuthError::AccessDenied)` - Announcement posted by a non-staff user
    pub async fn create(
        &self,
        current: &CurrentUser,
        params: PostParams,
        rt_only: bool,
    ) -> Result<PostDetail, AppError> {
        params.validate()?;

        if params.category == ForumCategory::Announcement {
            current.ensure(
                current.scope.is_staff(),
                "announcements are reserved for staff",
            )?;
        }

        let rw = current.scope.home_rw().ok_or_else(|| {
            AppError::BadRequest("Posting requires an account with a home RW".to_string())
        })?;
        let rt_id = if rt_only {
            Some(current.scope.home_rt().ok_or_else(|| {
                AppError::BadRequest("RT-only posts require an account with a home RT".to_string())
            })?)
        } else {
            None
        };

        let post = PostRepository::new(self.db)
            .create(params, current.id(), rw, rt_id)
            .await?;

        tracing::info!(
            "User {} published forum post {} in {}",
            current.id(),
            post.id,
            post.category
        );

        self.detail(current, post).await
    }

    /// Edits a post; only its author may.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        params: PostParams,
    ) -> Result<PostDetail, AppError> {
        params.validate()?;

        let post = self.find(id).await?;
        current.ensure(
            post.author_id == current.id(),
            "only the author may edit a post",
        )?;

        if params.category == ForumCategory::Announcement {
            current.ensure(
                current.scope.is_staff(),
                "announcements are reserved for staff",
            )?;
        }

        let post = PostRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        self.detail(current, post).await
    }

    /// Soft deletes a post; the author or staff covering the post's area.
    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        let post = self.find(id).await?;
        current.ensure(
            post.author_id == current.id() || moderates(&current.scope, &post),
            "only the author or covering staff may delete a post",
        )?;

        PostRepository::new(self.db).deactivate(post.id).await?;

        tracing::info!("User {} deleted forum post {}", current.id(), post.id);

        Ok(())
    }

    /// Flips the pinned flag of a post in the user's area.
    pub async fn toggle_pin(&self, current: &CurrentUser, id: i32) -> Result<PostDetail, AppError> {
        let mut post = self.find(id).await?;
        current.ensure(
            moderates(&current.scope, &post),
            "pinning requires staff covering the post",
        )?;

        post.is_pinned = !post.is_pinned;
        PostRepository::new(self.db)
            .set_pinned(post.id, post.is_pinned)
            .await?;

        self.detail(current, post).await
    }

    /// Comments on a visible post and tells the post author.
    pub async fn add_comment(
        &self,
        current: &CurrentUser,
        id: i32,
        content: String,
    ) -> Result<CommentView, AppError> {
        let content = content.trim().to_string();
        validate_comment(&content)?;

        let post = self.find_visible(current, id).await?;

        let comment = CommentRepository::new(self.db)
            .create(post.id, current.id(), content)
            .await?;

        if post.author_id != current.id() {
            NotificationService::new(self.db)
                .send(
                    &[post.author_id],
                    NewNotification::new(
                        NotificationKind::Forum,
                        "New comment",
                        format!("{} commented on '{}'", current.user.name, post.title),
                        Some(post.id),
                    ),
                )
                .await;
        }

        Ok(CommentView {
            comment,
            author_name: current.user.name.clone(),
        })
    }

    /// Soft deletes a comment; its author or staff covering the post.
    pub async fn delete_comment(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        let comment = CommentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        if comment.author_id != current.id() {
            let post = self.find(comment.post_id).await?;
            current.ensure(
                moderates(&current.scope, &post),
                "only the author or covering staff may delete a comment",
            )?;
        }

        CommentRepository::new(self.db)
            .deactivate(comment.id)
            .await?;

        Ok(())
    }

    /// Likes a visible post or removes the like.
    ///
    /// # Returns
    /// `(liked, like_count)` after the toggle
    pub async fn toggle_like(
        &self,
        current: &CurrentUser,
        id: i32,
    ) -> Result<(bool, u64), AppError> {
        let post = self.find_visible(current, id).await?;

        let repo = LikeRepository::new(self.db);
        let liked = repo.toggle(post.id, current.id()).await?;
        let count = repo.count(post.id).await?;

        Ok((liked, count))
    }

    async fn detail(&self, current: &CurrentUser, post: Post) -> Result<PostDetail, AppError> {
        let comments = CommentRepository::new(self.db)
            .get_by_post(post.id)
            .await?;

        let mut author_ids: Vec<i32> = comments.iter().map(|c| c.author_id).collect();
        author_ids.push(post.author_id);
        let names = UserRepository::new(self.db)
            .names_by_ids(&author_ids)
            .await?;

        let likes = LikeRepository::new(self.db);
        let like_count = likes.count(post.id).await?;
        let liked_by_me = likes.exists(post.id, current.id()).await?;

        let comments: Vec<CommentView> = comments
            .into_iter()
            .map(|comment| CommentView {
                author_name: names.get(&comment.author_id).cloned().unwrap_or_default(),
                comment,
            })
            .collect();

        Ok(PostDetail {
            summary: PostSummary {
                author_name: names.get(&post.author_id).cloned().unwrap_or_default(),
                like_count,
                comment_count: comments.len() as u64,
                post,
            },
            liked_by_me,
            comments,
        })
    }

    async fn find(&self, id: i32) -> Result<Post, AppError> {
        PostRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    async fn find_visible(&self, current: &CurrentUser, id: i32) -> Result<Post, AppError> {
        let post = self.find(id).await?;

        current.ensure(
            current.scope.sees_area(post.rw, post.rt_id),
            "post outside the user's area",
        )?;

        Ok(post)
    }
}

/// Staff covering the post's area: its RT when RT-only, otherwise the whole RW.
fn moderates(scope: &Scope, post: &Post) -> bool {
    match post.rt_id {
        Some(rt_id) => scope.manages(Territory {
            rt_id,
            rw: post.rw,
        }),
        None => match scope {
            Scope::All => true,
            Scope::Rw { rw } => *rw == post.rw,
            Scope::Rt { rw, .. } => *rw == post.rw,
            _ => false,
        },
    }
}
