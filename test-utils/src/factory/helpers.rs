//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{
    family::FamilyFactory, resident::ResidentFactory, rt::RtFactory, user::UserFactory,
};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a 16 digit identity number (NIK or KK) that is unique within the test run.
pub fn next_identity_number() -> String {
    format!("{:016}", 3_174_000_000_000_000u64 + next_id())
}

/// Creates a household inside a new RT of the given RW.
///
/// Creates:
/// 1. RT in `rw`
/// 2. Family in that RT
/// 3. Resident as head of the family
/// 4. WARGA account linked to the resident
///
/// # Returns
/// - `Ok((rt, family, resident, user))` - All created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_household(
    db: &DatabaseConnection,
    rw: i32,
) -> Result<
    (
        entity::rt::Model,
        entity::family::Model,
        entity::resident::Model,
        entity::user::Model,
    ),
    DbErr,
> {
    let rt = RtFactory::new(db).rw(rw).build().await?;
    let family = FamilyFactory::new(db, rt.id).build().await?;
    let resident = ResidentFactory::new(db, rt.id)
        .family(family.id, "KEPALA_KELUARGA")
        .build()
        .await?;
    let family = crate::factory::family::set_head(db, family, resident.id).await?;
    let user = UserFactory::new(db)
        .role("WARGA")
        .rt_id(rt.id)
        .rw(rw)
        .resident_id(resident.id)
        .build()
        .await?;

    Ok((rt, family, resident, user))
}

/// Creates an RT together with its chairman account (role RT).
///
/// # Returns
/// - `Ok((rt, user))` - The RT and its staff account
/// - `Err(DbErr)` - Database error during creation
pub async fn create_rt_with_chairman(
    db: &DatabaseConnection,
    rw: i32,
) -> Result<(entity::rt::Model, entity::user::Model), DbErr> {
    let rt = RtFactory::new(db).rw(rw).build().await?;
    let user = UserFactory::new(db)
        .role("RT")
        .rt_id(rt.id)
        .rw(rw)
        .build()
        .await?;

    Ok((rt, user))
}
