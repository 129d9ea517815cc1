pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_rt_table;
mod m20260105_000002_create_family_table;
mod m20260105_000003_create_resident_table;
mod m20260105_000004_create_user_table;
mod m20260106_000005_create_document_table;
mod m20260106_000006_create_complaint_table;
mod m20260107_000007_create_event_table;
mod m20260107_000008_create_event_participant_table;
mod m20260108_000009_create_social_assistance_table;
mod m20260108_000010_create_social_assistance_recipient_table;
mod m20260109_000011_create_forum_post_table;
mod m20260109_000012_create_forum_comment_table;
mod m20260109_000013_create_forum_like_table;
mod m20260110_000014_create_notification_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_rt_table::Migration),
            Box::new(m20260105_000002_create_family_table::Migration),
            Box::new(m20260105_000003_create_resident_table::Migration),
            Box::new(m20260105_000004_create_user_table::Migration),
            Box::new(m20260106_000005_create_document_table::Migration),
            Box::new(m20260106_000006_create_complaint_table::Migration),
            Box::new(m20260107_000007_create_event_table::Migration),
            Box::new(m20260107_000008_create_event_participant_table::Migration),
            Box::new(m20260108_000009_create_social_assistance_table::Migration),
            Box::new(m20260108_000010_create_social_assistance_recipient_table::Migration),
            Box::new(m20260109_000011_create_forum_post_table::Migration),
            Box::new(m20260109_000012_create_forum_comment_table::Migration),
            Box::new(m20260109_000013_create_forum_like_table::Migration),
            Box::new(m20260110_000014_create_notification_table::Migration),
        ]
    }
}
