use super::*;

/// Tests filing a complaint.
///
/// Expected: status DITERIMA in the reporter's RT
#[tokio::test]
async fn creates_received_complaint() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, _, _, user) = factory::helpers::create_household(db, 1).await?;

    let complaint = ComplaintRepository::new(db)
        .create(
            user.id,
            rt.id,
            CreateComplaintParams {
                title: "Lampu jalan mati".to_string(),
                description: "Lampu di gang 3 mati sejak seminggu".to_string(),
                category: ComplaintCategory::Infrastructure,
                location: Some("Gang 3".to_string()),
            },
            None,
        )
        .await?;

    assert_eq!(complaint.status, ComplaintStatus::Received);
    assert_eq!(complaint.rt_id, rt.id);
    assert_eq!(complaint.category, ComplaintCategory::Infrastructure);

    Ok(())
}

/// Tests resolving a complaint with a response.
///
/// Expected: SELESAI with handler, response and resolution time
#[tokio::test]
async fn resolves_processing_complaint() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, _, _, user) = factory::helpers::create_household(db, 1).await?;
    let staff = factory::user::create_rw_user(db, 1).await?;
    let complaint = factory::complaint::ComplaintFactory::new(db, user.id, rt.id)
        .status("DIPROSES")
        .build()
        .await?;
    let repo = ComplaintRepository::new(db);

    let stale = repo
        .transition(
            complaint.id,
            ComplaintStatus::Received,
            ComplaintStatus::Processing,
            staff.id,
            None,
            None,
        )
        .await?;
    assert!(stale.is_none());

    let resolved = repo
        .transition(
            complaint.id,
            ComplaintStatus::Processing,
            ComplaintStatus::Resolved,
            staff.id,
            Some("Lampu sudah diganti".to_string()),
            Some(Utc::now()),
        )
        .await?
        .unwrap();

    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    assert_eq!(resolved.handled_by, Some(staff.id));
    assert_eq!(resolved.response.as_deref(), Some("Lampu sudah diganti"));
    assert!(resolved.resolved_at.is_some());

    Ok(())
}

/// Tests listing by reporter versus by RT territory.
///
/// Expected: reporter sees own complaint only, RT staff see both of the RT
#[tokio::test]
async fn lists_by_reporter_or_territory() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, _, _, user) = factory::helpers::create_household(db, 1).await?;
    let neighbour = factory::user::UserFactory::new(db)
        .rt_id(rt.id)
        .rw(1)
        .build()
        .await?;
    factory::complaint::create_complaint(db, user.id, rt.id).await?;
    factory::complaint::create_complaint(db, neighbour.id, rt.id).await?;
    let repo = ComplaintRepository::new(db);
    let rt_scope = Scope::Rt {
        rt_id: rt.id,
        rw: 1,
    };

    let own = repo
        .get_paginated(&ComplaintQuery::default(), &rt_scope, Some(user.id))
        .await?;
    let all_rt = repo
        .get_paginated(&ComplaintQuery::default(), &rt_scope, None)
        .await?;

    assert_eq!(own.total, 1);
    assert_eq!(own.items[0].reporter_id, user.id);
    assert_eq!(all_rt.total, 2);

    Ok(())
}
