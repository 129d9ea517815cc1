use super::*;

/// Tests RW staff manage every RT of their RW.
///
/// Expected: Ok(CurrentUser)
#[tokio::test]
async fn grants_rw_user_rt_in_own_rw() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let rt = factory::rt::create_rt_in_rw(db, 4).await?;
    let rw_user = factory::user::create_rw_user(db, 4).await?;
    AuthSession::new(session).set_user_id(rw_user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ManageRt(rt.id)])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests an RT chairman cannot manage a neighbouring RT.
///
/// Expected: Err(AuthError::AccessDenied) naming the RT
#[tokio::test]
async fn denies_rt_chairman_other_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, chairman) = factory::helpers::create_rt_with_chairman(db, 1).await?;
    let other_rt = factory::rt::create_rt_in_rw(db, 1).await?;
    AuthSession::new(session).set_user_id(chairman.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ManageRt(other_rt.id)])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(_, message))) => {
            assert!(message.contains(&other_rt.id.to_string()));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

/// Tests an unknown RT id.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn returns_not_found_for_unknown_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ManageRt(999)])
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
