use super::*;

/// Tests proposing a recipient and the duplicate check.
///
/// Expected: DIUSULKAN, `exists` true, second insert rejected by the unique index
#[tokio::test]
async fn proposes_recipient_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, _) = factory::helpers::create_household(db, 1).await?;
    let staff = factory::user::create_rw_user(db, 1).await?;
    let program = factory::assistance::create_assistance(db, staff.id).await?;
    let repo = RecipientRepository::new(db);

    let recipient = repo
        .create(program.id, resident.id, staff.id, Some("Lansia".to_string()))
        .await?;

    assert_eq!(recipient.status, RecipientStatus::Proposed);
    assert!(repo.exists(program.id, resident.id).await?);
    assert!(repo.find(program.id, recipient.id).await?.is_some());
    assert!(repo.find(program.id + 1, recipient.id).await?.is_none());

    Ok(())
}

/// Tests distributing an approved recipient.
///
/// Expected: DISALURKAN with a distribution time; stale status refused
#[tokio::test]
async fn distributes_approved_recipient() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, _) = factory::helpers::create_household(db, 1).await?;
    let staff = factory::user::create_rw_user(db, 1).await?;
    let program = factory::assistance::create_assistance(db, staff.id).await?;
    let recipient =
        factory::assistance::create_recipient(db, program.id, resident.id, staff.id, "DISETUJUI")
            .await?;
    let repo = RecipientRepository::new(db);

    let stale = repo
        .transition(
            recipient.id,
            RecipientStatus::Proposed,
            RecipientStatus::Approved,
            None,
        )
        .await?;
    assert!(stale.is_none());

    let distributed = repo
        .transition(
            recipient.id,
            RecipientStatus::Approved,
            RecipientStatus::Distributed,
            Some(Utc::now()),
        )
        .await?
        .unwrap();

    assert_eq!(distributed.status, RecipientStatus::Distributed);
    assert!(distributed.distributed_at.is_some());

    Ok(())
}

/// Tests territory filtering of recipient lists.
///
/// Expected: RT scope only sees recipients living in that RT
#[tokio::test]
async fn filters_recipients_by_scope() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, _, resident, _) = factory::helpers::create_household(db, 1).await?;
    let (_, _, other_resident, _) = factory::helpers::create_household(db, 1).await?;
    let staff = factory::user::create_rw_user(db, 1).await?;
    let program = factory::assistance::create_assistance(db, staff.id).await?;
    factory::assistance::create_recipient(db, program.id, resident.id, staff.id, "DIUSULKAN")
        .await?;
    factory::assistance::create_recipient(
        db,
        program.id,
        other_resident.id,
        staff.id,
        "DIUSULKAN",
    )
    .await?;
    let repo = RecipientRepository::new(db);

    let rt_page = repo
        .get_paginated(
            program.id,
            PageRequest::default(),
            &Scope::Rt {
                rt_id: rt.id,
                rw: 1,
            },
        )
        .await?;
    let rw_page = repo
        .get_paginated(program.id, PageRequest::default(), &Scope::Rw { rw: 1 })
        .await?;

    assert_eq!(rt_page.total, 1);
    assert_eq!(rt_page.items[0].resident_id, resident.id);
    assert_eq!(rw_page.total, 2);

    Ok(())
}
