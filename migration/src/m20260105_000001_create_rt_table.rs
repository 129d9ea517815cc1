use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rt::Table)
                    .if_not_exists()
                    .col(pk_auto(Rt::Id))
                    .col(integer(Rt::Number))
                    .col(integer(Rt::Rw))
                    .col(string_null(Rt::ChairmanName))
                    .col(string_null(Rt::Address))
                    .col(boolean(Rt::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Rt::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rt_number_rw")
                    .table(Rt::Table)
                    .col(Rt::Number)
                    .col(Rt::Rw)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rt::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Rt {
    Table,
    Id,
    Number,
    Rw,
    ChairmanName,
    Address,
    IsActive,
    CreatedAt,
}
