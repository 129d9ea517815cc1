use crate::{
    model::forum::ForumCategory,
    server::{
        data::forum::{CommentRepository, LikeRepository, PostRepository},
        model::{forum::PostParams, page::PageRequest, scope::Scope},
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod comments;
mod likes;
mod posts;
