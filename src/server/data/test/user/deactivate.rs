use super::*;

/// Tests soft deleting a user.
///
/// Expected: Ok(true) first, Ok(false) once already inactive
#[tokio::test]
async fn deactivates_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    assert!(repo.deactivate(user.id).await?);
    assert!(!repo.deactivate(user.id).await?);

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert!(!stored.is_active);

    Ok(())
}
