use test_utils::{builder::TestBuilder, factory};

use super::current_user;
use crate::server::{
    error::{auth::AuthError, AppError},
    model::{notification::BroadcastParams, page::PageRequest},
    service::notification::NotificationService,
};

fn broadcast(rt_id: Option<i32>) -> BroadcastParams {
    BroadcastParams {
        title: "Kerja bakti".to_string(),
        message: "Minggu pagi pukul 07.00 di balai warga".to_string(),
        rt_id,
    }
}

/// Tests an RT chairman broadcasting.
///
/// Expected: every active account of the RT receives it, the neighbouring RT does not,
/// and another RT cannot be targeted
#[tokio::test]
async fn rt_broadcast_reaches_own_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, _, warga) = factory::helpers::create_household(db, 50).await?;
    let chairman = factory::user::UserFactory::new(db)
        .role("RT")
        .rt_id(rt.id)
        .rw(50)
        .build()
        .await?;
    let (other_rt, _, _, outsider) = factory::helpers::create_household(db, 50).await?;

    let service = NotificationService::new(db);
    let current = current_user(db, session, chairman.id).await?;

    let sent = service.broadcast(&current, broadcast(None)).await?;
    assert_eq!(sent, 2);
    assert_eq!(service.unread_count(warga.id).await?, 1);
    assert_eq!(service.unread_count(outsider.id).await?, 0);

    let result = service.broadcast(&current, broadcast(Some(other_rt.id))).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests WARGA broadcasting.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn warga_cannot_broadcast() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, _, _, warga) = factory::helpers::create_household(db, 51).await?;

    let current = current_user(db, session, warga.id).await?;
    let result = NotificationService::new(db)
        .broadcast(&current, broadcast(None))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests marking notifications read.
///
/// Expected: own notification is read, someone else's is not found, mark all clears the rest
#[tokio::test]
async fn marks_only_own_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let first = factory::notification::create_notification(db, user.id).await?;
    factory::notification::create_notification(db, user.id).await?;
    factory::notification::create_notification(db, user.id).await?;
    let foreign = factory::notification::create_notification(db, other.id).await?;

    let service = NotificationService::new(db);

    service.mark_read(first.id, user.id).await?;
    assert_eq!(service.unread_count(user.id).await?, 2);

    let result = service.mark_read(foreign.id, user.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert_eq!(service.mark_all_read(user.id).await?, 2);
    let unread = service
        .get_paginated(user.id, PageRequest::default(), true)
        .await?;
    assert_eq!(unread.total, 0);
    assert_eq!(service.unread_count(other.id).await?, 1);

    Ok(())
}
