use super::*;

/// Tests creating a resident and finding it by NIK.
///
/// Expected: enums stored and parsed back, no family
#[tokio::test]
async fn creates_and_finds_by_nik() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    let repo = ResidentRepository::new(db);

    let created = repo.create(params("3174000011112222", rt.id)).await?;
    let found = repo.find_by_nik("3174000011112222").await?.unwrap();

    assert_eq!(created.id, found.id);
    assert_eq!(found.gender, Gender::Female);
    assert_eq!(found.marital_status, MaritalStatus::Married);
    assert_eq!(found.family_id, None);

    Ok(())
}

/// Tests the NIK uniqueness check, which also counts inactive rows.
///
/// Expected: taken for others, free when excluding the owner
#[tokio::test]
async fn checks_nik_including_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    let resident = factory::resident::ResidentFactory::new(db, rt.id)
        .nik("3174000099990000")
        .is_active(false)
        .build()
        .await?;
    let repo = ResidentRepository::new(db);

    assert!(repo.nik_exists("3174000099990000", None).await?);
    assert!(!repo.nik_exists("3174000099990000", Some(resident.id)).await?);
    assert!(repo.find_by_nik("3174000099990000").await?.is_none());

    Ok(())
}

/// Tests soft delete.
///
/// Expected: hidden from `find_by_id`, not counted in the RT
#[tokio::test]
async fn deactivates_resident() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    let resident = factory::create_resident(db, rt.id).await?;
    let repo = ResidentRepository::new(db);

    assert_eq!(repo.count_active_in_rt(rt.id).await?, 1);
    assert!(repo.deactivate(resident.id).await?);
    assert!(repo.find_by_id(resident.id).await?.is_none());
    assert_eq!(repo.count_active_in_rt(rt.id).await?, 0);

    Ok(())
}
