use super::*;

/// Tests an RT chairman counts as staff.
///
/// Expected: Ok(CurrentUser) with the chairman's RT scope
#[tokio::test]
async fn grants_staff_access_to_rt_chairman() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, chairman) = factory::helpers::create_rt_with_chairman(db, 3).await?;
    AuthSession::new(session).set_user_id(chairman.id).await?;

    let current = AuthGuard::new(db, session)
        .require(&[Permission::Staff])
        .await?;

    assert_eq!(
        current.scope,
        Scope::Rt {
            rt_id: rt.id,
            rw: 3
        }
    );

    Ok(())
}

/// Tests residents are not staff.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_staff_access_to_warga() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, _, _, warga) = factory::helpers::create_household(db, 1).await?;
    AuthSession::new(session).set_user_id(warga.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Staff])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests the RW-or-admin permission for an RW chairman.
///
/// Expected: Ok(CurrentUser) with `Scope::Rw`
#[tokio::test]
async fn grants_rw_or_admin_to_rw_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let rw_user = factory::user::create_rw_user(db, 5).await?;
    AuthSession::new(session).set_user_id(rw_user.id).await?;

    let current = AuthGuard::new(db, session)
        .require(&[Permission::RwOrAdmin])
        .await?;

    assert_eq!(current.scope, Scope::Rw { rw: 5 });

    Ok(())
}
