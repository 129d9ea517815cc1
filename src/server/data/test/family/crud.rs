use super::*;

/// Tests creating, updating and setting the head of a family.
///
/// Expected: KK checks honour the exclusion, head stored
#[tokio::test]
async fn creates_updates_and_sets_head() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    let head = factory::create_resident(db, rt.id).await?;
    let repo = FamilyRepository::new(db);

    let family = repo
        .create(&CreateFamilyParams {
            kk_number: "3174010101010001".to_string(),
            address: "Jl. Anggrek 1".to_string(),
            rt_id: rt.id,
            head_resident_id: None,
        })
        .await?;
    assert!(repo.kk_number_exists("3174010101010001", None).await?);
    assert!(!repo.kk_number_exists("3174010101010001", Some(family.id)).await?);

    let updated = repo
        .update(
            family.id,
            UpdateFamilyParams {
                kk_number: "3174010101010002".to_string(),
                address: "Jl. Anggrek 2".to_string(),
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.kk_number, "3174010101010002");

    repo.set_head(family.id, Some(head.id)).await?;
    let stored = repo.find_by_id(family.id).await?.unwrap();
    assert_eq!(stored.head_resident_id, Some(head.id));

    Ok(())
}

/// Tests territory filtering of the family listing.
///
/// Expected: RT scope sees its family, household scope only its own
#[tokio::test]
async fn filters_by_scope() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, family, resident, _) = factory::helpers::create_household(db, 1).await?;
    factory::create_family(db, rt.id).await?;
    factory::helpers::create_household(db, 1).await?;
    let repo = FamilyRepository::new(db);

    let rt_page = repo
        .get_paginated(
            PageRequest::default(),
            &Scope::Rt {
                rt_id: rt.id,
                rw: 1,
            },
        )
        .await?;
    let household_page = repo
        .get_paginated(
            PageRequest::default(),
            &Scope::Household {
                resident_id: resident.id,
                family_id: Some(family.id),
                rt_id: rt.id,
                rw: 1,
            },
        )
        .await?;
    let all_page = repo.get_paginated(PageRequest::default(), &Scope::All).await?;

    assert_eq!(rt_page.total, 2);
    assert_eq!(household_page.total, 1);
    assert_eq!(household_page.items[0].id, family.id);
    assert_eq!(all_page.total, 3);

    Ok(())
}

/// Tests soft delete, which also clears the head.
///
/// Expected: Ok(true) then hidden
#[tokio::test]
async fn deactivates_family() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, family, _, _) = factory::helpers::create_household(db, 1).await?;
    let repo = FamilyRepository::new(db);

    assert!(repo.deactivate(family.id).await?);
    assert!(repo.find_by_id(family.id).await?.is_none());
    assert!(!repo.deactivate(family.id).await?);

    Ok(())
}
