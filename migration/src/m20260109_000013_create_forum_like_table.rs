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
                    .table(ForumLike::Table)
                    .if_not_exists()
                    .col(pk_auto(ForumLike::Id))
                    .col(integer(ForumLike::PostId))
                    .col(integer(ForumLike::UserId))
                    .col(
                        timestamp_with_time_zone(ForumLike::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_like_post_id")
                            .from(ForumLike::Table, ForumLike::PostId)
                            .to(ForumPost::Table, ForumPost::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_forum_like_user_id")
                            .from(ForumLike::Table, ForumLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_like_post_user")
                    .table(ForumLike::Table)
                    .col(ForumLike::PostId)
                    .col(ForumLike::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ForumLike::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ForumLike {
    Table,
    Id,
    PostId,
    UserId,
    CreatedAt,
}
