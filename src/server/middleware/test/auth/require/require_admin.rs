use super::*;

/// Tests admin user successfully passes admin permission check.
///
/// Expected: Ok(CurrentUser) with `Scope::All`
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let current = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(current.id(), admin.id);
    assert_eq!(current.scope, Scope::All);

    Ok(())
}

/// Tests RW staff are denied admin permission.
///
/// Expected: Err(AuthError::AccessDenied) mentioning the admin role
#[tokio::test]
async fn denies_access_to_rw_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let rw_user = factory::user::create_rw_user(db, 2).await?;
    AuthSession::new(session).set_user_id(rw_user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, rw_user.id);
            assert!(message.contains("admin"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}
