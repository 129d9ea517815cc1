use super::*;

/// Tests selecting events due for a reminder.
///
/// Expected: only the unsent event starting within the window
#[tokio::test]
async fn selects_unsent_events_in_window() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::user::create_rw_user(db, 1).await?;
    let now = Utc::now();

    let due = factory::event::EventFactory::new(db, 1, creator.id)
        .starts_at(now + Duration::hours(3))
        .build()
        .await?;
    factory::event::EventFactory::new(db, 1, creator.id)
        .starts_at(now + Duration::hours(4))
        .reminder_sent(true)
        .build()
        .await?;
    factory::event::EventFactory::new(db, 1, creator.id)
        .starts_at(now + Duration::days(3))
        .build()
        .await?;
    factory::event::EventFactory::new(db, 1, creator.id)
        .starts_at(now + Duration::hours(2))
        .is_active(false)
        .build()
        .await?;
    let repo = EventRepository::new(db);

    let events = repo.due_for_reminder(now, now + Duration::hours(24)).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, due.id);

    repo.mark_reminder_sent(due.id).await?;
    assert!(repo
        .due_for_reminder(now, now + Duration::hours(24))
        .await?
        .is_empty());

    Ok(())
}
