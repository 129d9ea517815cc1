use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000003_create_resident_table::Resident, m20260105_000004_create_user_table::User,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(pk_auto(Document::Id))
                    .col(integer(Document::ResidentId))
                    .col(integer(Document::RequestedBy))
                    .col(string(Document::DocumentType))
                    .col(text(Document::Purpose))
                    .col(string(Document::Status))
                    .col(string_null(Document::LetterNumber).unique_key())
                    .col(text_null(Document::Notes))
                    .col(text_null(Document::RejectionReason))
                    .col(string_null(Document::AttachmentPath))
                    .col(integer_null(Document::ProcessedBy))
                    .col(integer_null(Document::SignedBy))
                    .col(
                        timestamp_with_time_zone(Document::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Document::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Document::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_resident_id")
                            .from(Document::Table, Document::ResidentId)
                            .to(Resident::Table, Resident::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_requested_by")
                            .from(Document::Table, Document::RequestedBy)
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
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Document {
    Table,
    Id,
    ResidentId,
    RequestedBy,
    DocumentType,
    Purpose,
    Status,
    LetterNumber,
    Notes,
    RejectionReason,
    AttachmentPath,
    ProcessedBy,
    SignedBy,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}
