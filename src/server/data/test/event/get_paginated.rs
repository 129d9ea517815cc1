use super::*;

/// Tests event visibility for an RT member.
///
/// Expected: RW-wide events and events of the own RT, not other RTs or RWs
#[tokio::test]
async fn rt_member_sees_rw_wide_and_own_rt() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, _, _, user) = factory::helpers::create_household(db, 1).await?;
    let other_rt = factory::rt::create_rt_in_rw(db, 1).await?;
    let creator = factory::user::create_rw_user(db, 1).await?;

    factory::event::create_event(db, 1, creator.id).await?;
    factory::event::EventFactory::new(db, 1, creator.id)
        .rt_id(rt.id)
        .build()
        .await?;
    factory::event::EventFactory::new(db, 1, creator.id)
        .rt_id(other_rt.id)
        .build()
        .await?;
    factory::event::create_event(db, 2, creator.id).await?;

    let scope = Scope::Household {
        resident_id: user.resident_id.unwrap(),
        family_id: None,
        rt_id: rt.id,
        rw: 1,
    };
    let page = EventRepository::new(db)
        .get_paginated(PageRequest::default(), EventQuery::default(), &scope, Utc::now())
        .await?;

    assert_eq!(page.total, 2);

    Ok(())
}

/// Tests the upcoming filter and its ordering.
///
/// Expected: only future events, soonest first
#[tokio::test]
async fn upcoming_lists_future_soonest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::user::create_rw_user(db, 1).await?;
    let now = Utc::now();

    let later = factory::event::EventFactory::new(db, 1, creator.id)
        .starts_at(now + Duration::days(5))
        .build()
        .await?;
    let sooner = factory::event::EventFactory::new(db, 1, creator.id)
        .starts_at(now + Duration::days(1))
        .build()
        .await?;
    factory::event::EventFactory::new(db, 1, creator.id)
        .starts_at(now - Duration::days(1))
        .build()
        .await?;

    let page = EventRepository::new(db)
        .get_paginated(
            PageRequest::default(),
            EventQuery { upcoming: true },
            &Scope::Rw { rw: 1 },
            now,
        )
        .await?;

    let ids: Vec<i32> = page.items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);

    Ok(())
}
