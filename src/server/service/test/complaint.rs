use test_utils::{builder::TestBuilder, factory};

use super::{current_user, uploads};
use crate::{
    model::complaint::{ComplaintCategory, ComplaintStatus},
    server::{
        error::{auth::AuthError, AppError},
        model::complaint::{ComplaintQuery, CreateComplaintParams},
        service::{complaint::ComplaintService, notification::NotificationService},
    },
};

fn broken_streetlight() -> CreateComplaintParams {
    CreateComplaintParams {
        title: "Lampu jalan mati".to_string(),
        description: "Lampu di ujung gang mati sejak minggu lalu".to_string(),
        category: ComplaintCategory::Infrastructure,
        location: Some("Gang Mawar".to_string()),
    }
}

/// Tests filing a complaint from a household.
///
/// Expected: complaint lands in the reporter's home RT and staff are notified
#[tokio::test]
async fn files_complaint_in_home_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, _, warga) = factory::helpers::create_household(db, 2).await?;
    let rw_user = factory::user::create_rw_user(db, 2).await?;

    let current = current_user(db, session, warga.id).await?;
    let view = ComplaintService::new(db)
        .create(&current, &uploads(), broken_streetlight(), None)
        .await?;

    assert_eq!(view.complaint.rt_id, rt.id);
    assert_eq!(view.complaint.status, ComplaintStatus::Received);
    assert_eq!(view.reporter_name, warga.name);
    assert_eq!(NotificationService::new(db).unread_count(rw_user.id).await?, 1);

    Ok(())
}

/// Tests filing a complaint from an account without a home RT.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rw_account_cannot_file_complaint() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let rw_user = factory::user::create_rw_user(db, 2).await?;

    let current = current_user(db, session, rw_user.id).await?;
    let result = ComplaintService::new(db)
        .create(&current, &uploads(), broken_streetlight(), None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests handling a complaint through to resolution.
///
/// Expected: resolve before processing fails, resolution stamps `resolved_at` and
/// notifies the reporter
#[tokio::test]
async fn staff_process_and_resolve() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, _, warga) = factory::helpers::create_household(db, 7).await?;
    let chairman = factory::user::UserFactory::new(db)
        .role("RT")
        .rt_id(rt.id)
        .rw(7)
        .build()
        .await?;
    let complaint = factory::complaint::create_complaint(db, warga.id, rt.id).await?;

    let service = ComplaintService::new(db);
    let staff = current_user(db, session, chairman.id).await?;

    let early = service
        .resolve(&staff, complaint.id, Some("Sudah".to_string()))
        .await;
    assert!(matches!(early, Err(AppError::BadRequest(_))));

    service.process(&staff, complaint.id).await?;
    let resolved = service
        .resolve(&staff, complaint.id, Some("Lampu sudah diganti".to_string()))
        .await?;

    assert_eq!(resolved.complaint.status, ComplaintStatus::Resolved);
    assert_eq!(resolved.complaint.handled_by, Some(chairman.id));
    assert_eq!(
        resolved.complaint.response.as_deref(),
        Some("Lampu sudah diganti")
    );
    assert!(resolved.complaint.resolved_at.is_some());
    assert_eq!(NotificationService::new(db).unread_count(warga.id).await?, 2);

    Ok(())
}

/// Tests closing a complaint with a blank response.
///
/// Expected: Err(Validation) on `response` for resolve and reject, and the complaint
/// stays DIPROSES
#[tokio::test]
async fn closing_requires_response() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, chairman) = factory::helpers::create_rt_with_chairman(db, 8).await?;
    let reporter = factory::user::create_user(db).await?;
    let complaint = factory::complaint::ComplaintFactory::new(db, reporter.id, rt.id)
        .status("DIPROSES")
        .build()
        .await?;

    let service = ComplaintService::new(db);
    let staff = current_user(db, session, chairman.id).await?;

    for response in [None, Some(String::new()), Some("   ".to_string())] {
        let resolved = service.resolve(&staff, complaint.id, response.clone()).await;
        let rejected = service.reject(&staff, complaint.id, response).await;

        for result in [resolved, rejected] {
            match result {
                Err(AppError::Validation(errors)) => {
                    assert!(errors.iter().any(|e| e.field == "response"));
                }
                other => panic!("Expected Validation error, got: {:?}", other),
            }
        }
    }

    let current = service.get_by_id(&staff, complaint.id).await?;
    assert_eq!(current.complaint.status, ComplaintStatus::Processing);

    Ok(())
}

/// Tests complaint visibility.
///
/// Expected: WARGA list only their own complaints and cannot open a neighbour's;
/// staff of another RT are denied
#[tokio::test]
async fn warga_only_see_own_complaints() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, _, warga) = factory::helpers::create_household(db, 8).await?;
    let neighbour = factory::user::UserFactory::new(db)
        .rt_id(rt.id)
        .rw(8)
        .build()
        .await?;
    let (_, other_chairman) = factory::helpers::create_rt_with_chairman(db, 8).await?;
    let own = factory::complaint::create_complaint(db, warga.id, rt.id).await?;
    let theirs = factory::complaint::create_complaint(db, neighbour.id, rt.id).await?;

    let service = ComplaintService::new(db);
    let current = current_user(db, session, warga.id).await?;

    let page = service
        .get_paginated(&current, ComplaintQuery::default())
        .await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].complaint.id, own.id);

    let result = service.get_by_id(&current, theirs.id).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let other_staff = current_user(db, session, other_chairman.id).await?;
    let result = service.process(&other_staff, own.id).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
