use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_rt_table::Rt;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Family::Table)
                    .if_not_exists()
                    .col(pk_auto(Family::Id))
                    .col(string_uniq(Family::KkNumber))
                    .col(string(Family::Address))
                    .col(integer(Family::RtId))
                    // Not a foreign key: resident references family, so this side stays loose.
                    .col(integer_null(Family::HeadResidentId))
                    .col(boolean(Family::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Family::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Family::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_family_rt_id")
                            .from(Family::Table, Family::RtId)
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
            .drop_table(Table::drop().table(Family::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Family {
    Table,
    Id,
    KkNumber,
    Address,
    RtId,
    HeadResidentId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
