use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000004_create_user_table::User, m20260109_000011_create_forum_post_table::ForumPost,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumComment::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumComment::Id))
                    .col(integer(ForumComment::PostId))
                    .col(integer(ForumComment::AuthorId))
                    .col(text(ForumComment::Content))
                    .col(boolean(ForumComment::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(ForumComment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_comment_post_id")
                            .from(ForumComment::Table, ForumComment::PostId)
                            .to(ForumPost::Table, ForumPost::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_comment_author_id")
                            .from(ForumComment::Table, ForumComment::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumComment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumComment {
    Table,
    Id,
    PostId,
    AuthorId,
    Content,
    IsActive,
    CreatedAt,
}
