use super::*;

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: "hash".to_string(),
        name: "Siti Aminah".to_string(),
        role: Role::Warga,
        rt_id: None,
        rw: None,
        resident_id: None,
    }
}

/// Tests creating a user and finding it by username.
///
/// Expected: Ok with role parsed back and account active
#[tokio::test]
async fn creates_and_finds_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    let created = repo.create(new_user("siti")).await?;
    let found = repo.find_by_username("siti").await?.unwrap();

    assert_eq!(created.id, found.id);
    assert_eq!(found.role, Role::Warga);
    assert!(found.is_active);
    assert!(repo.username_exists("siti").await?);
    assert!(!repo.username_exists("budi").await?);

    Ok(())
}

/// Tests that the unique username index rejects duplicates.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn fails_for_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    repo.create(new_user("siti")).await?;
    let result = repo.create(new_user("siti")).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests updating the role assignment of an account.
///
/// Expected: Ok(Some) with the new role and RT
#[tokio::test]
async fn updates_role_assignment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    let user = factory::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update(
            user.id,
            "Ketua RT".to_string(),
            RoleAssignment {
                role: Role::Rt,
                rt_id: Some(rt.id),
                rw: Some(rt.rw),
                resident_id: None,
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.role, Role::Rt);
    assert_eq!(updated.rt_id, Some(rt.id));
    assert_eq!(updated.name, "Ketua RT");

    Ok(())
}
