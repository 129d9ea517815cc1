use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "complaint")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reporter_id: i32,
    pub rt_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub location: Option<String>,
    pub attachment_path: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub handled_by: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub resolved_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReporterId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Reporter,
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
