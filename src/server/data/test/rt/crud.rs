use super::*;

/// Tests creating an RT and checking the (number, rw) pair.
///
/// Expected: pair is taken in its RW but free in another RW or for the RT itself
#[tokio::test]
async fn creates_and_checks_number() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = RtRepository::new(db);

    let rt = repo
        .create(CreateRtParams {
            number: 4,
            rw: 2,
            chairman_name: Some("Pak Joko".to_string()),
            address: None,
        })
        .await?;

    assert!(rt.is_active);
    assert!(repo.number_exists(4, 2, None).await?);
    assert!(!repo.number_exists(4, 3, None).await?);
    assert!(!repo.number_exists(4, 2, Some(rt.id)).await?);

    Ok(())
}

/// Tests listing active RTs ordered by RW and number.
///
/// Expected: inactive RT hidden, RW filter applied
#[tokio::test]
async fn lists_active_rts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let second = factory::rt::RtFactory::new(db).number(2).rw(1).build().await?;
    let first = factory::rt::RtFactory::new(db).number(1).rw(1).build().await?;
    factory::rt::RtFactory::new(db).number(3).rw(1).is_active(false).build().await?;
    factory::rt::RtFactory::new(db).number(1).rw(2).build().await?;

    let repo = RtRepository::new(db);
    let rw_one: Vec<i32> = repo.get_all(Some(1)).await?.iter().map(|rt| rt.id).collect();

    assert_eq!(rw_one, vec![first.id, second.id]);
    assert_eq!(repo.get_all(None).await?.len(), 3);

    Ok(())
}

/// Tests update, deactivate and the RW lookup of a deactivated RT.
///
/// Expected: RT disappears from `find_by_id` but `find_rw` still resolves
#[tokio::test]
async fn updates_and_deactivates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::rt::create_rt_in_rw(db, 7).await?;
    let repo = RtRepository::new(db);

    let updated = repo
        .update(
            rt.id,
            UpdateRtParams {
                number: 9,
                chairman_name: None,
                address: Some("Jl. Kenanga".to_string()),
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.number, 9);
    assert_eq!(updated.rw, 7);

    assert!(repo.deactivate(rt.id).await?);
    assert!(repo.find_by_id(rt.id).await?.is_none());
    assert_eq!(repo.find_rw(rt.id).await?, Some(7));
    assert!(repo.update(rt.id, UpdateRtParams {
        number: 1,
        chairman_name: None,
        address: None,
    })
    .await?
    .is_none());

    Ok(())
}
