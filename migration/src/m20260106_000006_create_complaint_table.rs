use sea_orm_migration::{prelude::*, schema::*};

use super::{m20260105_000001_create_rt_table::Rt, m20260105_000004_create_user_table::User};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaint::Table)
                    .if_not_exists()
                    .col(pk_auto(Complaint::Id))
                    .col(integer(Complaint::ReporterId))
                    .col(integer(Complaint::RtId))
                    .col(string(Complaint::Title))
                    .col(text(Complaint::Description))
                    .col(string(Complaint::Category))
                    .col(string_null(Complaint::Location))
                    .col(string_null(Complaint::AttachmentPath))
                    .col(string(Complaint::Status))
                    .col(text_null(Complaint::Response))
                    .col(integer_null(Complaint::HandledBy))
                    .col(
                        timestamp_with_time_zone(Complaint::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Complaint::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Complaint::ResolvedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_reporter_id")
                            .from(Complaint::Table, Complaint::ReporterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_rt_id")
                            .from(Complaint::Table, Complaint::RtId)
                            .to(Rt::Table, Rt::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaint::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Complaint {
    Table,
    Id,
    ReporterId,
    RtId,
    Title,
    Description,
    Category,
    Location,
    AttachmentPath,
    Status,
    Response,
    HandledBy,
    CreatedAt,
    UpdatedAt,
    ResolvedAt,
}
