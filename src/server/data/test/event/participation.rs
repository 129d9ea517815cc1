use super::*;

/// Tests that joining twice keeps a single participation.
///
/// Expected: count 1 after two joins, 0 after leaving
#[tokio::test]
async fn join_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::user::create_rw_user(db, 1).await?;
    let user = factory::create_user(db).await?;
    let event = factory::event::create_event(db, 1, creator.id).await?;
    let repo = EventRepository::new(db);

    repo.join(event.id, user.id).await?;
    repo.join(event.id, user.id).await?;
    assert_eq!(repo.participant_count(event.id).await?, 1);
    assert!(repo.is_participant(event.id, user.id).await?);

    repo.leave(event.id, user.id).await?;
    repo.leave(event.id, user.id).await?;
    assert_eq!(repo.participant_count(event.id).await?, 0);

    Ok(())
}

/// Tests bulk participant counts and joined flags for a listing.
///
/// Expected: counts per event and the events the user joined
#[tokio::test]
async fn counts_participants_per_event() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::user::create_rw_user(db, 1).await?;
    let user = factory::create_user(db).await?;
    let first = factory::event::create_event(db, 1, creator.id).await?;
    let second = factory::event::create_event(db, 1, creator.id).await?;
    factory::event::join_event(db, first.id, user.id).await?;
    factory::event::join_event(db, first.id, creator.id).await?;
    let repo = EventRepository::new(db);

    let counts = repo.participant_counts(&[first.id, second.id]).await?;
    let joined = repo.joined_event_ids(user.id, &[first.id, second.id]).await?;

    assert_eq!(counts.get(&first.id), Some(&2));
    assert_eq!(counts.get(&second.id), None);
    assert!(joined.contains(&first.id));
    assert!(!joined.contains(&second.id));

    Ok(())
}

/// Tests that rescheduling clears the reminder flag.
///
/// Expected: reminder_sent false after moving the start time
#[tokio::test]
async fn reschedule_resets_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::user::create_rw_user(db, 1).await?;
    let event = factory::event::EventFactory::new(db, 1, creator.id)
        .reminder_sent(true)
        .build()
        .await?;

    let updated = EventRepository::new(db)
        .update(
            event.id,
            EventDetails {
                title: event.title.clone(),
                description: event.description.clone(),
                location: event.location.clone(),
                starts_at: event.starts_at + Duration::days(3),
                ends_at: None,
            },
        )
        .await?
        .unwrap();

    assert!(!updated.reminder_sent);

    Ok(())
}
