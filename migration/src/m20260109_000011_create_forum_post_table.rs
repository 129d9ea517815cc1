use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000004_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ForumPost::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumPost::Id))
                    .col(integer(ForumPost::AuthorId))
                    .col(integer(ForumPost::Rw))
                    .col(integer_null(ForumPost::RtId))
                    .col(string(ForumPost::Title))
                    .col(text(ForumPost::Content))
                    .col(string(ForumPost::Category))
                    .col(boolean(ForumPost::IsPinned).default(false))
                    .col(boolean(ForumPost::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(ForumPost::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(ForumPost::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_post_author_id")
                            .from(ForumPost::Table, ForumPost::AuthorId)
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
            .drop_table(Table::drop().table(ForumPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumPost {
    Table,
    Id,
    AuthorId,
    Rw,
    RtId,
    Title,
    Content,
    Category,
    IsPinned,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
