use chrono::NaiveDate;
use test_utils::{builder::TestBuilder, factory};

use super::current_user;
use crate::{
    model::resident::{Gender, MaritalStatus},
    server::{
        data::{family::FamilyRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::{
            notification::BroadcastParams,
            resident::{ResidentParams, ResidentQuery},
        },
        service::{notification::NotificationService, resident::ResidentService},
    },
};

fn resident_params(nik: &str, rt_id: i32) -> ResidentParams {
    ResidentParams {
        nik: nik.to_string(),
        name: "Rahmat Hidayat".to_string(),
        birth_place: "Bandung".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1985, 7, 12).unwrap(),
        gender: Gender::Male,
        religion: "Islam".to_string(),
        occupation: Some("Guru".to_string()),
        marital_status: MaritalStatus::Married,
        address: "Jl. Anggrek 12".to_string(),
        rt_id,
        phone: None,
    }
}

/// Tests RT staff registering residents.
///
/// Expected: own RT accepted, another RT denied, duplicate NIK conflicts
#[tokio::test]
async fn rt_registers_residents_in_own_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, chairman) = factory::helpers::create_rt_with_chairman(db, 41).await?;
    let other_rt = factory::rt::create_rt_in_rw(db, 41).await?;

    let service = ResidentService::new(db);
    let current = current_user(db, session, chairman.id).await?;

    let resident = service
        .create(&current, resident_params("3174111122223333", rt.id))
        .await?;
    assert_eq!(resident.rt_id, rt.id);

    let denied = service
        .create(&current, resident_params("3174111122224444", other_rt.id))
        .await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let duplicate = service
        .create(&current, resident_params("3174111122223333", rt.id))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests WARGA listing residents.
///
/// Expected: only themselves and their family members
#[tokio::test]
async fn warga_list_own_household() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, family, _, warga) = factory::helpers::create_household(db, 42).await?;
    factory::resident::ResidentFactory::new(db, rt.id)
        .family(family.id, "ISTRI")
        .build()
        .await?;
    factory::resident::create_resident(db, rt.id).await?;

    let current = current_user(db, session, warga.id).await?;
    let page = ResidentService::new(db)
        .get_paginated(&current, ResidentQuery::default())
        .await?;

    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|r| r.family_id == Some(family.id)));

    Ok(())
}

/// Tests deleting a family head.
///
/// Expected: the resident is gone and the family has no head
#[tokio::test]
async fn deleting_head_clears_family_head() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, family, head, _) = factory::helpers::create_household(db, 43).await?;
    let rw_user = factory::user::create_rw_user(db, 43).await?;

    let service = ResidentService::new(db);
    let current = current_user(db, session, rw_user.id).await?;

    service.delete(&current, head.id).await?;

    assert!(matches!(
        service.find(head.id).await,
        Err(AppError::NotFound(_))
    ));
    let family = FamilyRepository::new(db)
        .find_by_id(family.id)
        .await?
        .expect("family stays active");
    assert_eq!(family.head_resident_id, None);

    Ok(())
}

/// Tests moving a family member to another RT.
///
/// Expected: Err(BadRequest) until the resident leaves the family
#[tokio::test]
async fn family_member_cannot_move_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, _, head, _) = factory::helpers::create_household(db, 44).await?;
    let other_rt = factory::rt::create_rt_in_rw(db, 44).await?;
    let rw_user = factory::user::create_rw_user(db, 44).await?;

    let current = current_user(db, session, rw_user.id).await?;
    let result = ResidentService::new(db)
        .update(&current, head.id, resident_params(&head.nik, other_rt.id))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests moving a resident who has an account to another RT.
///
/// Expected: the account follows the resident, so broadcasts to the new RT reach it and
/// broadcasts to the old RT no longer do
#[tokio::test]
async fn moved_resident_account_follows_rt() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let old_rt = factory::rt::create_rt_in_rw(db, 45).await?;
    let new_rt = factory::rt::create_rt_in_rw(db, 45).await?;
    let resident = factory::resident::create_resident(db, old_rt.id).await?;
    let account = factory::user::UserFactory::new(db)
        .resident_id(resident.id)
        .rt_id(old_rt.id)
        .rw(45)
        .build()
        .await?;
    let rw_user = factory::user::create_rw_user(db, 45).await?;

    let current = current_user(db, session, rw_user.id).await?;
    ResidentService::new(db)
        .update(&current, resident.id, resident_params(&resident.nik, new_rt.id))
        .await?;

    let moved = UserRepository::new(db).find_by_id(account.id).await?.unwrap();
    assert_eq!(moved.rt_id, Some(new_rt.id));
    assert_eq!(moved.rw, Some(45));

    let notifications = NotificationService::new(db);
    let broadcast = |rt_id| BroadcastParams {
        title: "Posyandu".to_string(),
        message: "Jadwal posyandu bulan ini".to_string(),
        rt_id: Some(rt_id),
    };

    notifications.broadcast(&current, broadcast(old_rt.id)).await?;
    assert_eq!(notifications.unread_count(account.id).await?, 0);

    notifications.broadcast(&current, broadcast(new_rt.id)).await?;
    assert_eq!(notifications.unread_count(account.id).await?, 1);

    Ok(())
}
