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
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::Title))
                    .col(text(Event::Description))
                    .col(string(Event::Location))
                    .col(timestamp_with_time_zone(Event::StartsAt))
                    .col(timestamp_with_time_zone_null(Event::EndsAt))
                    .col(integer(Event::Rw))
                    .col(integer_null(Event::RtId))
                    .col(integer(Event::CreatedBy))
                    .col(boolean(Event::ReminderSent).default(false))
                    .col(boolean(Event::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Event::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_created_by")
                            .from(Event::Table, Event::CreatedBy)
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
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Title,
    Description,
    Location,
    StartsAt,
    EndsAt,
    Rw,
    RtId,
    CreatedBy,
    ReminderSent,
    IsActive,
    CreatedAt,
}
