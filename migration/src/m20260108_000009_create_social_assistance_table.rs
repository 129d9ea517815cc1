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
                    .table(SocialAssistance::Table)
                    .if_not_exists()
                    .col(pk_auto(SocialAssistance::Id))
                    .col(string(SocialAssistance::Name))
                    .col(text_null(SocialAssistance::Description))
                    .col(string(SocialAssistance::AssistanceType))
                    .col(string_null(SocialAssistance::Source))
                    .col(big_integer_null(SocialAssistance::Amount))
                    .col(date(SocialAssistance::PeriodStart))
                    .col(date_null(SocialAssistance::PeriodEnd))
                    .col(integer_null(SocialAssistance::Rw))
                    .col(integer(SocialAssistance::CreatedBy))
                    .col(boolean(SocialAssistance::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(SocialAssistance::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_social_assistance_created_by")
                            .from(SocialAssistance::Table, SocialAssistance::CreatedBy)
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
            .drop_table(Table::drop().table(SocialAssistance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SocialAssistance {
    Table,
    Id,
    Name,
    Description,
    AssistanceType,
    Source,
    Amount,
    PeriodStart,
    PeriodEnd,
    Rw,
    CreatedBy,
    IsActive,
    CreatedAt,
}
