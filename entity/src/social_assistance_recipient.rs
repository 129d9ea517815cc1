use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "social_assistance_recipient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub assistance_id: i32,
    pub resident_id: i32,
    pub status: String,
    pub proposed_by: i32,
    pub notes: Option<String>,
    pub distributed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::social_assistance::Entity",
        from = "Column::AssistanceId",
        to = "super::social_assistance::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    SocialAssistance,
    #[sea_orm(
        belongs_to = "super::resident::Entity",
        from = "Column::ResidentId",
        to = "super::resident::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Resident,
}

impl Related<super::social_assistance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialAssistance.def()
    }
}

impl Related<super::resident::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resident.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
