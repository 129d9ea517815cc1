use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "family")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub kk_number: String,
    pub address: String,
    pub rt_id: i32,
    pub head_resident_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rt::Entity",
        from = "Column::RtId",
        to = "super::rt::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Rt,
}

impl Related<super::rt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
