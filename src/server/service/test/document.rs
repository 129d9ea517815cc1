use chrono::{Datelike, Utc};
use test_utils::{builder::TestBuilder, factory};

use super::{current_user, uploads};
use crate::{
    model::document::{DocumentStatus, DocumentType},
    server::{
        error::{auth::AuthError, AppError},
        model::document::CreateDocumentParams,
        service::{document::DocumentService, notification::NotificationService},
    },
};

fn domicile_request(resident_id: i32) -> CreateDocumentParams {
    CreateDocumentParams {
        resident_id,
        document_type: DocumentType::Domicile,
        purpose: "Persyaratan membuka rekening bank".to_string(),
    }
}

/// Tests a WARGA requesting a letter for a member of their family.
///
/// Expected: Ok with status DIAJUKAN, the RT chairman notified
#[tokio::test]
async fn warga_requests_for_family_member() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, family, _, warga) = factory::helpers::create_household(db, 3).await?;
    let child = factory::resident::ResidentFactory::new(db, rt.id)
        .family(family.id, "ANAK")
        .build()
        .await?;
    let chairman = factory::user::UserFactory::new(db)
        .role("RT")
        .rt_id(rt.id)
        .rw(3)
        .build()
        .await?;

    let current = current_user(db, session, warga.id).await?;
    let view = DocumentService::new(db)
        .create(&current, &uploads(), domicile_request(child.id), None)
        .await?;

    assert_eq!(view.document.status, DocumentStatus::Submitted);
    assert_eq!(view.document.requested_by, warga.id);
    assert_eq!(view.resident_name, child.name);
    assert_eq!(
        NotificationService::new(db).unread_count(chairman.id).await?,
        1
    );

    Ok(())
}

/// Tests a WARGA requesting a letter for a resident of another household.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn warga_cannot_request_for_other_household() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, _, warga) = factory::helpers::create_household(db, 3).await?;
    let neighbour = factory::resident::create_resident(db, rt.id).await?;

    let current = current_user(db, session, warga.id).await?;
    let result = DocumentService::new(db)
        .create(&current, &uploads(), domicile_request(neighbour.id), None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests the full workflow from request to completion.
///
/// Expected: only RW signs, letter numbers count up per RW, type and year, and the
/// requester is notified at every step
#[tokio::test]
async fn walks_through_workflow_and_numbers_letters() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, resident, warga) = factory::helpers::create_household(db, 4).await?;
    let chairman = factory::user::UserFactory::new(db)
        .role("RT")
        .rt_id(rt.id)
        .rw(4)
        .build()
        .await?;
    let rw_user = factory::user::create_rw_user(db, 4).await?;
    let first = factory::document::DocumentFactory::new(db, resident.id, warga.id)
        .status("DISETUJUI")
        .build()
        .await?;
    let submitted = factory::document::create_document(db, resident.id, warga.id).await?;

    let service = DocumentService::new(db);
    let rt_staff = current_user(db, session, chairman.id).await?;
    let rw_staff = current_user(db, session, rw_user.id).await?;

    let denied = service.sign(&rt_staff, first.id).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let signed = service.sign(&rw_staff, first.id).await?;
    let prefix = format!("001/SKD/RT{:03}/RW004/", rt.number);
    assert_eq!(signed.document.status, DocumentStatus::Signed);
    assert!(signed
        .document
        .letter_number
        .as_deref()
        .is_some_and(|n| n.starts_with(&prefix)));

    service.process(&rt_staff, submitted.id).await?;
    service
        .approve(&rt_staff, submitted.id, Some("Lengkap".to_string()))
        .await?;
    let second = service.sign(&rw_staff, submitted.id).await?;
    assert!(second
        .document
        .letter_number
        .as_deref()
        .is_some_and(|n| n.starts_with("002/SKD/")));

    let completed = service.complete(&rt_staff, submitted.id).await?;
    assert_eq!(completed.document.status, DocumentStatus::Completed);
    assert!(completed.document.completed_at.is_some());
    assert_eq!(completed.document.notes.as_deref(), Some("Lengkap"));

    // first: signed; second: processed, approved, signed, completed
    assert_eq!(NotificationService::new(db).unread_count(warga.id).await?, 5);

    Ok(())
}

/// Tests rejecting with and without a reason, and after signing.
///
/// Expected: blank reason is a validation error, signed letters cannot be rejected
#[tokio::test]
async fn reject_requires_reason_and_unsigned_request() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (rt, _, resident, warga) = factory::helpers::create_household(db, 5).await?;
    let chairman = factory::user::UserFactory::new(db)
        .role("RT")
        .rt_id(rt.id)
        .rw(5)
        .build()
        .await?;
    let pending = factory::document::create_document(db, resident.id, warga.id).await?;
    let signed = factory::document::DocumentFactory::new(db, resident.id, warga.id)
        .status("DITANDATANGANI")
        .letter_number("001/SKD/RT001/RW005/I/2026")
        .build()
        .await?;

    let service = DocumentService::new(db);
    let current = current_user(db, session, chairman.id).await?;

    let blank = service.reject(&current, pending.id, "  ".to_string()).await;
    assert!(matches!(blank, Err(AppError::Validation(_))));

    let rejected = service
        .reject(&current, pending.id, "KTP tidak terbaca".to_string())
        .await?;
    assert_eq!(rejected.document.status, DocumentStatus::Rejected);
    assert_eq!(
        rejected.document.rejection_reason.as_deref(),
        Some("KTP tidak terbaca")
    );

    let too_late = service
        .reject(&current, signed.id, "Salah ketik".to_string())
        .await;
    assert!(matches!(too_late, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests withdrawing requests.
///
/// Expected: staff cannot withdraw someone's request, requester can while DIAJUKAN only
#[tokio::test]
async fn requester_withdraws_submitted_request() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let (_, _, resident, warga) = factory::helpers::create_household(db, 6).await?;
    let admin = factory::user::create_admin(db).await?;
    let submitted = factory::document::create_document(db, resident.id, warga.id).await?;
    let processing = factory::document::DocumentFactory::new(db, resident.id, warga.id)
        .status("DIPROSES")
        .build()
        .await?;

    let service = DocumentService::new(db);

    let admin_user = current_user(db, session, admin.id).await?;
    let result = service.withdraw(&admin_user, &uploads(), submitted.id).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let requester = current_user(db, session, warga.id).await?;
    let result = service
        .withdraw(&requester, &uploads(), processing.id)
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    service
        .withdraw(&requester, &uploads(), submitted.id)
        .await?;
    let gone = service.get_by_id(&requester, submitted.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests letter number sequences across document types, RWs and years.
///
/// Expected: each (type, RW, year) counts on its own; numbers from another RW or from
/// last year do not advance the sequence
#[tokio::test]
async fn letter_sequence_is_per_type_rw_and_year() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let year = Utc::now().year();
    let admin = factory::user::create_admin(db).await?;
    let rt_21 = factory::rt::create_rt_in_rw(db, 21).await?;
    let rt_22 = factory::rt::create_rt_in_rw(db, 22).await?;
    let resident_21 = factory::resident::create_resident(db, rt_21.id).await?;
    let resident_22 = factory::resident::create_resident(db, rt_22.id).await?;

    factory::document::DocumentFactory::new(db, resident_21.id, admin.id)
        .status("SELESAI")
        .letter_number(format!("007/SKD/RT001/RW021/XII/{}", year - 1))
        .build()
        .await?;
    factory::document::DocumentFactory::new(db, resident_22.id, admin.id)
        .status("SELESAI")
        .letter_number(format!("003/SKD/RT001/RW022/I/{}", year))
        .build()
        .await?;

    let approved = |resident_id, document_type: &'static str| {
        factory::document::DocumentFactory::new(db, resident_id, admin.id)
            .document_type(document_type)
            .status("DISETUJUI")
            .build()
    };
    let domicile_21 = approved(resident_21.id, "SURAT_DOMISILI").await?;
    let introduction_21 = approved(resident_21.id, "SURAT_PENGANTAR").await?;
    let second_domicile_21 = approved(resident_21.id, "SURAT_DOMISILI").await?;
    let domicile_22 = approved(resident_22.id, "SURAT_DOMISILI").await?;

    let service = DocumentService::new(db);
    let current = current_user(db, session, admin.id).await?;

    for (id, expected) in [
        (domicile_21.id, format!("001/SKD/RT{:03}/RW021/", rt_21.number)),
        (introduction_21.id, format!("001/SP/RT{:03}/RW021/", rt_21.number)),
        (second_domicile_21.id, format!("002/SKD/RT{:03}/RW021/", rt_21.number)),
        (domicile_22.id, format!("004/SKD/RT{:03}/RW022/", rt_22.number)),
    ] {
        let signed = service.sign(&current, id).await?;
        let letter_number = signed.document.letter_number.unwrap_or_default();

        assert!(
            letter_number.starts_with(&expected),
            "{} should start with {}",
            letter_number,
            expected
        );
        assert!(letter_number.ends_with(&format!("/{}", year)));
    }

    Ok(())
}
