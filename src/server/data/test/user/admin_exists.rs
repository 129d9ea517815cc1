use super::*;

/// Tests detecting an active admin.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_when_admin_exists() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_admin(db).await?;

    let result = UserRepository::new(db).admin_exists().await;

    assert!(result.is_ok());
    assert!(result.unwrap());

    Ok(())
}

/// Tests the first-time setup scenario with only WARGA accounts.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let result = UserRepository::new(db).admin_exists().await;

    assert!(!result.unwrap());

    Ok(())
}

/// Tests that a deactivated admin does not count.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_inactive_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .role("ADMIN")
        .is_active(false)
        .build()
        .await?;

    let result = UserRepository::new(db).admin_exists().await;

    assert!(!result.unwrap());

    Ok(())
}
