use super::*;

/// Tests fanning one notification out to several users.
///
/// Expected: one row per user, none for an empty list
#[tokio::test]
async fn creates_one_per_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let repo = NotificationRepository::new(db);
    let notification = NewNotification::new(
        NotificationKind::System,
        "Kerja bakti",
        "Minggu pagi pukul 07.00",
        None,
    );

    assert_eq!(repo.create_many(&[first.id, second.id], &notification).await?, 2);
    assert_eq!(repo.create_many(&[], &notification).await?, 0);
    assert_eq!(repo.unread_count(first.id).await?, 1);

    let page = repo
        .get_paginated(second.id, PageRequest::default(), false)
        .await?;
    assert_eq!(page.items[0].kind, NotificationKind::System);
    assert_eq!(page.items[0].title, "Kerja bakti");

    Ok(())
}

/// Tests that users can only mark their own notifications read.
///
/// Expected: Ok(false) for someone else's notification
#[tokio::test]
async fn marks_only_own_notification() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = factory::notification::create_notification(db, owner.id).await?;
    let repo = NotificationRepository::new(db);

    assert!(!repo.mark_read(notification.id, other.id).await?);
    assert_eq!(repo.unread_count(owner.id).await?, 1);

    assert!(repo.mark_read(notification.id, owner.id).await?);
    assert_eq!(repo.unread_count(owner.id).await?, 0);

    Ok(())
}

/// Tests the unread filter and marking everything read.
///
/// Expected: 2 unread listed, both marked by `mark_all_read`
#[tokio::test]
async fn lists_unread_and_marks_all() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::notification::create_notification(db, user.id).await?;
    factory::notification::create_notification(db, user.id).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .is_read(true)
        .build()
        .await?;
    let repo = NotificationRepository::new(db);

    let unread = repo
        .get_paginated(user.id, PageRequest::default(), true)
        .await?;
    assert_eq!(unread.total, 2);

    assert_eq!(repo.mark_all_read(user.id).await?, 2);
    assert_eq!(repo.unread_count(user.id).await?, 0);

    Ok(())
}
