use super::*;

/// Tests selecting RT and RW staff responsible for an RT.
///
/// Expected: the RT chairman and the RW account, not staff of other areas
#[tokio::test]
async fn finds_staff_for_rt() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (rt, chairman) = factory::helpers::create_rt_with_chairman(db, 3).await?;
    let rw_user = factory::user::create_rw_user(db, 3).await?;
    factory::helpers::create_rt_with_chairman(db, 3).await?;
    factory::user::create_rw_user(db, 4).await?;

    let mut ids = UserRepository::new(db)
        .staff_ids_for_rt(rt.id, rt.rw)
        .await?;
    ids.sort();
    let mut expected = vec![chairman.id, rw_user.id];
    expected.sort();

    assert_eq!(ids, expected);

    Ok(())
}

/// Tests broadcasting audiences for one RT and for a whole RW.
///
/// Expected: RT audience excludes the other RT, RW audience includes both
#[tokio::test]
async fn finds_active_users_in_area() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (rt_a, _, _, warga_a) = factory::helpers::create_household(db, 5).await?;
    let (_, _, _, warga_b) = factory::helpers::create_household(db, 5).await?;
    factory::helpers::create_household(db, 6).await?;

    let repo = UserRepository::new(db);
    let rt_audience = repo.active_ids_in_area(Some(5), Some(rt_a.id)).await?;
    let rw_audience = repo.active_ids_in_area(Some(5), None).await?;

    assert_eq!(rt_audience, vec![warga_a.id]);
    assert_eq!(rw_audience.len(), 2);
    assert!(rw_audience.contains(&warga_b.id));

    Ok(())
}

/// Tests resolving accounts linked to residents.
///
/// Expected: the linked WARGA account only
#[tokio::test]
async fn finds_accounts_for_residents() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (rt, _, resident, user) = factory::helpers::create_household(db, 1).await?;
    let unlinked = factory::create_resident(db, rt.id).await?;

    let repo = UserRepository::new(db);
    let ids = repo.ids_for_residents(&[resident.id, unlinked.id]).await?;

    assert_eq!(ids, vec![user.id]);
    assert!(repo.resident_has_account(resident.id).await?);
    assert!(!repo.resident_has_account(unlinked.id).await?);
    assert!(repo.ids_for_residents(&[]).await?.is_empty());

    Ok(())
}

/// Tests labelling rows with author names.
///
/// Expected: names for every known id, including deactivated accounts; unknown ids absent
#[tokio::test]
async fn maps_ids_to_names() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let active = factory::user::UserFactory::new(db).name("Siti").build().await?;
    let inactive = factory::user::UserFactory::new(db)
        .name("Joko")
        .is_active(false)
        .build()
        .await?;

    let names = UserRepository::new(db)
        .names_by_ids(&[active.id, inactive.id, 9999])
        .await?;

    assert_eq!(names.len(), 2);
    assert_eq!(names.get(&active.id).map(String::as_str), Some("Siti"));
    assert_eq!(names.get(&inactive.id).map(String::as_str), Some("Joko"));

    Ok(())
}
