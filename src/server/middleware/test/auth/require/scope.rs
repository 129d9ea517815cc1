use super::*;

/// Tests a linked WARGA account resolves to its household.
///
/// Expected: `Scope::Household` with the resident, family, RT and RW of the record
#[tokio::test]
async fn resolves_household_for_linked_warga() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, family, resident, warga) = factory::helpers::create_household(db, 6).await?;
    AuthSession::new(session).set_user_id(warga.id).await?;

    let current = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(
        current.scope,
        Scope::Household {
            resident_id: resident.id,
            family_id: Some(family.id),
            rt_id: rt.id,
            rw: 6,
        }
    );

    Ok(())
}

/// Tests a WARGA whose resident record was deactivated.
///
/// Expected: `Scope::Unassigned`
#[tokio::test]
async fn unassigned_when_linked_resident_is_inactive() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let rt = factory::rt::create_rt(db).await?;
    let resident = factory::resident::ResidentFactory::new(db, rt.id)
        .is_active(false)
        .build()
        .await?;
    let warga = factory::user::UserFactory::new(db)
        .resident_id(resident.id)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(warga.id).await?;

    let current = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(current.scope, Scope::Unassigned);

    Ok(())
}
