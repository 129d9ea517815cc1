use super::*;

/// Tests the RW filter, which matches the `rw` column or an RT inside the RW.
///
/// Expected: only the two accounts of RW 1
#[tokio::test]
async fn filters_by_rw() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, rt_user) = factory::helpers::create_rt_with_chairman(db, 1).await?;
    let rw_user = factory::user::create_rw_user(db, 1).await?;
    factory::user::create_rw_user(db, 2).await?;
    factory::user::create_admin(db).await?;

    let page = UserRepository::new(db)
        .get_paginated(&UserQuery {
            page: PageRequest::default(),
            role: None,
            rw: Some(1),
        })
        .await?;

    let mut ids: Vec<i32> = page.items.iter().map(|u| u.id).collect();
    ids.sort();
    let mut expected = vec![rt_user.id, rw_user.id];
    expected.sort();

    assert_eq!(page.total, 2);
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests role filtering and that inactive users are hidden.
///
/// Expected: the single active ADMIN
#[tokio::test]
async fn filters_by_role_and_hides_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    factory::user::UserFactory::new(db)
        .role("ADMIN")
        .is_active(false)
        .build()
        .await?;
    factory::create_user(db).await?;

    let page = UserRepository::new(db)
        .get_paginated(&UserQuery {
            page: PageRequest::default(),
            role: Some(Role::Admin),
            rw: None,
        })
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, admin.id);

    Ok(())
}

/// Tests page slicing and page count.
///
/// Expected: 2 items on page 1 of 3 total pages
#[tokio::test]
async fn paginates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_user(db).await?;
    }

    let page = UserRepository::new(db)
        .get_paginated(&UserQuery {
            page: PageRequest::new(Some(1), Some(2)),
            role: None,
            rw: None,
        })
        .await?;

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);

    Ok(())
}
