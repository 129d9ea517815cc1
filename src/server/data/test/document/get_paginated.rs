use super::*;

/// Tests territory filtering of document listings.
///
/// Expected: RT staff see requests of their RT, WARGA those of their household
#[tokio::test]
async fn filters_by_scope() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, family, head, user) = factory::helpers::create_household(db, 1).await?;
    let child = factory::resident::ResidentFactory::new(db, rt.id)
        .family(family.id, "ANAK")
        .build()
        .await?;
    let neighbour = factory::create_resident(db, rt.id).await?;
    factory::create_document(db, head.id, user.id).await?;
    factory::create_document(db, child.id, user.id).await?;
    factory::create_document(db, neighbour.id, user.id).await?;
    let (_, _, other_resident, other_user) = factory::helpers::create_household(db, 2).await?;
    factory::create_document(db, other_resident.id, other_user.id).await?;
    let repo = DocumentRepository::new(db);

    let rt_page = repo
        .get_paginated(
            &DocumentQuery::default(),
            &Scope::Rt {
                rt_id: rt.id,
                rw: 1,
            },
        )
        .await?;
    let household_page = repo
        .get_paginated(
            &DocumentQuery::default(),
            &Scope::Household {
                resident_id: head.id,
                family_id: Some(family.id),
                rt_id: rt.id,
                rw: 1,
            },
        )
        .await?;

    assert_eq!(rt_page.total, 3);
    assert_eq!(household_page.total, 2);

    Ok(())
}

/// Tests the status filter.
///
/// Expected: only DIPROSES requests
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, user) = factory::helpers::create_household(db, 1).await?;
    factory::create_document(db, resident.id, user.id).await?;
    let processing = factory::document::DocumentFactory::new(db, resident.id, user.id)
        .status("DIPROSES")
        .build()
        .await?;

    let page = DocumentRepository::new(db)
        .get_paginated(
            &DocumentQuery {
                page: PageRequest::default(),
                status: Some(DocumentStatus::Processing),
            },
            &Scope::All,
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, processing.id);

    Ok(())
}
