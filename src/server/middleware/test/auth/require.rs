use super::*;

mod require_admin;
mod require_manage_rt;
mod require_staff;
mod scope;

/// Tests a request without a logged-in user.
///
/// Verifies that the guard rejects a session that has no user id stored.
///
/// Expected: Err(AuthError::NotLoggedIn)
#[tokio::test]
async fn rejects_missing_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotLoggedIn))
    ));

    Ok(())
}

/// Tests a session pointing at a user that does not exist.
///
/// Expected: Err(AuthError::UserNotInDatabase) carrying the stale id
#[tokio::test]
async fn rejects_user_missing_from_database() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(4242).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    match result {
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(id))) => assert_eq!(id, 4242),
        other => panic!("Expected UserNotInDatabase error, got: {:?}", other),
    }

    Ok(())
}

/// Tests that deactivated accounts lose access immediately.
///
/// Verifies that an existing session stops working once the account is soft deleted.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn rejects_deactivated_account() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .role("ADMIN")
        .is_active(false)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(_)))
    ));

    Ok(())
}

/// Tests empty permission list grants access.
///
/// Verifies that any authenticated, active user passes when nothing is required.
///
/// Expected: Ok(CurrentUser)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let current = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(current.id(), user.id);
    assert_eq!(current.scope, Scope::Unassigned);

    Ok(())
}

/// Tests that if any permission fails, the whole check fails.
///
/// Verifies that an RT chairman passing `Staff` is still denied by `RwOrAdmin`.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn fails_if_any_permission_missing() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, chairman) = factory::helpers::create_rt_with_chairman(db, 1).await?;
    AuthSession::new(session).set_user_id(chairman.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Staff, Permission::RwOrAdmin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, chairman.id);
            assert!(message.contains("RW"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}
