use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000003_create_resident_table::Resident,
    m20260108_000009_create_social_assistance_table::SocialAssistance,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SocialAssistanceRecipient::Table)
                    .if_not_exists()
                    .col(pk_auto(SocialAssistanceRecipient::Id))
                    .col(integer(SocialAssistanceRecipient::AssistanceId))
                    .col(integer(SocialAssistanceRecipient::ResidentId))
                    .col(string(SocialAssistanceRecipient::Status))
                    .col(integer(SocialAssistanceRecipient::ProposedBy))
                    .col(text_null(SocialAssistanceRecipient::Notes))
                    .col(timestamp_with_time_zone_null(
                        SocialAssistanceRecipient::DistributedAt,
                    ))
                    .col(
                        timestamp_with_time_zone(SocialAssistanceRecipient::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(SocialAssistanceRecipient::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipient_assistance_id")
                            .from(
                                SocialAssistanceRecipient::Table,
                                SocialAssistanceRecipient::AssistanceId,
                            )
                            .to(SocialAssistance::Table, SocialAssistance::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipient_resident_id")
                            .from(
                                SocialAssistanceRecipient::Table,
                                SocialAssistanceRecipient::ResidentId,
                            )
                            .to(Resident::Table, Resident::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recipient_assistance_resident")
                    .table(SocialAssistanceRecipient::Table)
                    .col(SocialAssistanceRecipient::AssistanceId)
                    .col(SocialAssistanceRecipient::ResidentId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(SocialAssistanceRecipient::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum SocialAssistanceRecipient {
    Table,
    Id,
    AssistanceId,
    ResidentId,
    Status,
    ProposedBy,
    Notes,
    DistributedAt,
    CreatedAt,
    UpdatedAt,
}
