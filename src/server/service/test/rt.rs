use test_utils::{builder::TestBuilder, factory};

use super::current_user;
use crate::server::{
    data::resident::ResidentRepository,
    error::{auth::AuthError, AppError},
    model::rt::CreateRtParams,
    service::rt::RtService,
};

fn rt_params(number: i32, rw: i32) -> CreateRtParams {
    CreateRtParams {
        number,
        rw,
        chairman_name: Some("Pak Slamet".to_string()),
        address: None,
    }
}

/// Tests RW staff creating RTs.
///
/// Expected: own RW accepted, duplicate number conflicts, another RW denied
#[tokio::test]
async fn rw_creates_rts_in_own_rw() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let rw_user = factory::user::create_rw_user(db, 60).await?;

    let service = RtService::new(db);
    let current = current_user(db, session, rw_user.id).await?;

    let rt = service.create(&current, rt_params(1, 60)).await?;
    assert_eq!((rt.number, rt.rw), (1, 60));

    let duplicate = service.create(&current, rt_params(1, 60)).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let foreign = service.create(&current, rt_params(1, 61)).await;
    assert!(matches!(
        foreign,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests deleting an RT that still has residents.
///
/// Expected: Err(BadRequest) while residents remain, then the RT disappears from listings
#[tokio::test]
async fn delete_requires_empty_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let rt = factory::rt::create_rt_in_rw(db, 62).await?;
    let resident = factory::resident::create_resident(db, rt.id).await?;
    let admin = factory::user::create_admin(db).await?;

    let service = RtService::new(db);

    let result = service.delete(rt.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    ResidentRepository::new(db)
        .deactivate(resident.id)
        .await?;
    service.delete(rt.id).await?;

    let current = current_user(db, session, admin.id).await?;
    assert!(service.get_all(&current).await?.is_empty());

    Ok(())
}

/// Tests the RT dashboard counts.
///
/// Expected: residents, families and open work items of that RT only
#[tokio::test]
async fn summary_counts_rt_activity() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, resident, warga) = factory::helpers::create_household(db, 63).await?;
    factory::resident::create_resident(db, rt.id).await?;
    factory::helpers::create_household(db, 63).await?;
    factory::document::create_document(db, resident.id, warga.id).await?;
    factory::document::DocumentFactory::new(db, resident.id, warga.id)
        .status("SELESAI")
        .build()
        .await?;
    factory::complaint::create_complaint(db, warga.id, rt.id).await?;
    let rw_user = factory::user::create_rw_user(db, 63).await?;

    let current = current_user(db, session, rw_user.id).await?;
    let summary = RtService::new(db).summary(&current, rt.id).await?;

    assert_eq!(summary.rt_id, rt.id);
    assert_eq!(summary.residents, 2);
    assert_eq!(summary.families, 1);
    assert_eq!(summary.pending_documents, 1);
    assert_eq!(summary.open_complaints, 1);

    Ok(())
}
