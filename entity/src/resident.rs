use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resident")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nik: String,
    pub name: String,
    pub birth_place: String,
    pub birth_date: Date,
    pub gender: String,
    pub religion: String,
    pub occupation: Option<String>,
    pub marital_status: String,
    pub address: String,
    pub rt_id: i32,
    pub family_id: Option<i32>,
    pub family_role: Option<String>,
    pub phone: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::family::Entity",
        from = "Column::FamilyId",
        to = "super::family::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Family,
}

impl Related<super::rt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rt.def()
    }
}

impl Related<super::family::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Family.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
