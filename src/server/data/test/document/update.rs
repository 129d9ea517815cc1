use super::*;

/// Tests writing a signing step with its letter number.
///
/// Expected: status, signer and letter number stored
#[tokio::test]
async fn writes_signing_step() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, user) = factory::helpers::create_household(db, 1).await?;
    let signer = factory::user::create_rw_user(db, 1).await?;
    let document = factory::document::DocumentFactory::new(db, resident.id, user.id)
        .status("DISETUJUI")
        .build()
        .await?;

    let signed = DocumentRepository::new(db)
        .update(
            document.id,
            DocumentStatus::Approved,
            DocumentUpdate {
                status: Some(DocumentStatus::Signed),
                letter_number: Some("001/SKD/RT001/RW001/I/2026".to_string()),
                signed_by: Some(signer.id),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(signed.status, DocumentStatus::Signed);
    assert_eq!(signed.signed_by, Some(signer.id));
    assert_eq!(
        signed.letter_number.as_deref(),
        Some("001/SKD/RT001/RW001/I/2026")
    );

    Ok(())
}

/// Tests the status guard against concurrent changes.
///
/// Expected: Ok(None) when the stored status differs from the expected one
#[tokio::test]
async fn refuses_stale_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, user) = factory::helpers::create_household(db, 1).await?;
    let document = factory::create_document(db, resident.id, user.id).await?;

    let result = DocumentRepository::new(db)
        .update(
            document.id,
            DocumentStatus::Processing,
            DocumentUpdate {
                status: Some(DocumentStatus::Approved),
                ..Default::default()
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests counting letter numbers for the per-RW, per-type, per-year sequence.
///
/// Expected: only numbers of the same type, RW and year are counted
#[tokio::test]
async fn counts_letter_numbers_by_pattern() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, user) = factory::helpers::create_household(db, 1).await?;

    for number in [
        "001/SKD/RT001/RW001/I/2026",
        "002/SKD/RT002/RW001/II/2026",
        "001/SKD/RT001/RW002/I/2026",
        "001/SP/RT001/RW001/I/2026",
        "001/SKD/RT001/RW001/XII/2025",
    ] {
        factory::document::DocumentFactory::new(db, resident.id, user.id)
            .status("SELESAI")
            .letter_number(number)
            .build()
            .await?;
    }

    let count = DocumentRepository::new(db)
        .count_letter_numbers("%/SKD/RT%/RW001/%/2026")
        .await?;

    assert_eq!(count, 2);

    Ok(())
}
