use sea_orm_migration::{prelude::*, schema::*};

use super::{m20260105_000001_create_rt_table::Rt, m20260105_000002_create_family_table::Family};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resident::Table)
                    .if_not_exists()
                    .col(pk_auto(Resident::Id))
                    .col(string_uniq(Resident::Nik))
                    .col(string(Resident::Name))
                    .col(string(Resident::BirthPlace))
                    .col(date(Resident::BirthDate))
                    .col(string(Resident::Gender))
                    .col(string(Resident::Religion))
                    .col(string_null(Resident::Occupation))
                    .col(string(Resident::MaritalStatus))
                    .col(string(Resident::Address))
                    .col(integer(Resident::RtId))
                    .col(integer_null(Resident::FamilyId))
                    .col(string_null(Resident::FamilyRole))
                    .col(string_null(Resident::Phone))
                    .col(boolean(Resident::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Resident::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Resident::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resident_rt_id")
                            .from(Resident::Table, Resident::RtId)
                            .to(Rt::Table, Rt::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resident_family_id")
                            .from(Resident::Table, Resident::FamilyId)
                            .to(Family::Table, Family::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resident_rt_id")
                    .table(Resident::Table)
                    .col(Resident::RtId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Resident::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Resident {
    Table,
    Id,
    Nik,
    Name,
    BirthPlace,
    BirthDate,
    Gender,
    Religion,
    Occupation,
    MaritalStatus,
    Address,
    RtId,
    FamilyId,
    FamilyRole,
    Phone,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
