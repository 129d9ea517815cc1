use super::*;

/// Tests that RT staff only see residents of their own RT.
///
/// Expected: residents of the other RT are excluded
#[tokio::test]
async fn rt_scope_sees_own_rt() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::rt::create_rt_in_rw(db, 1).await?;
    let other_rt = factory::rt::create_rt_in_rw(db, 1).await?;
    let own = factory::create_resident(db, rt.id).await?;
    factory::create_resident(db, other_rt.id).await?;

    let page = ResidentRepository::new(db)
        .get_paginated(
            &ResidentQuery::default(),
            &Scope::Rt {
                rt_id: rt.id,
                rw: 1,
            },
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, own.id);

    Ok(())
}

/// Tests that RW staff see every RT of their RW.
///
/// Expected: both residents in RW 2, not the one in RW 3
#[tokio::test]
async fn rw_scope_sees_whole_rw() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt_a = factory::rt::create_rt_in_rw(db, 2).await?;
    let rt_b = factory::rt::create_rt_in_rw(db, 2).await?;
    let rt_c = factory::rt::create_rt_in_rw(db, 3).await?;
    factory::create_resident(db, rt_a.id).await?;
    factory::create_resident(db, rt_b.id).await?;
    factory::create_resident(db, rt_c.id).await?;

    let page = ResidentRepository::new(db)
        .get_paginated(&ResidentQuery::default(), &Scope::Rw { rw: 2 })
        .await?;

    assert_eq!(page.total, 2);

    Ok(())
}

/// Tests that WARGA see themselves and their family only.
///
/// Expected: the two household members, not the neighbour
#[tokio::test]
async fn household_scope_sees_family() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, family, head, _) = factory::helpers::create_household(db, 1).await?;
    factory::resident::ResidentFactory::new(db, rt.id)
        .family(family.id, "ANAK")
        .build()
        .await?;
    factory::create_resident(db, rt.id).await?;

    let page = ResidentRepository::new(db)
        .get_paginated(
            &ResidentQuery::default(),
            &Scope::Household {
                resident_id: head.id,
                family_id: Some(family.id),
                rt_id: rt.id,
                rw: 1,
            },
        )
        .await?;

    assert_eq!(page.total, 2);

    Ok(())
}

/// Tests name search and NIK prefix search.
///
/// Expected: one match each
#[tokio::test]
async fn searches_name_and_nik() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    factory::resident::ResidentFactory::new(db, rt.id)
        .name("Bambang Sutrisno")
        .build()
        .await?;
    factory::resident::ResidentFactory::new(db, rt.id)
        .name("Citra")
        .nik("9999000011112222")
        .build()
        .await?;
    let repo = ResidentRepository::new(db);

    let by_name = repo
        .get_paginated(
            &ResidentQuery {
                page: PageRequest::default(),
                search: Some("sutris".to_string()),
                rt_id: None,
            },
            &Scope::All,
        )
        .await?;
    let by_nik = repo
        .get_paginated(
            &ResidentQuery {
                page: PageRequest::default(),
                search: Some("99990000".to_string()),
                rt_id: Some(rt.id),
            },
            &Scope::All,
        )
        .await?;

    assert_eq!(by_name.total, 1);
    assert_eq!(by_name.items[0].name, "Bambang Sutrisno");
    assert_eq!(by_nik.total, 1);
    assert_eq!(by_nik.items[0].name, "Citra");

    Ok(())
}

/// Tests that an unassigned scope sees nothing.
///
/// Expected: empty page
#[tokio::test]
async fn unassigned_sees_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    factory::create_resident(db, rt.id).await?;

    let page = ResidentRepository::new(db)
        .get_paginated(&ResidentQuery::default(), &Scope::Unassigned)
        .await?;

    assert_eq!(page.total, 0);

    Ok(())
}
