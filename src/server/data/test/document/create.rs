use super::*;

/// Tests that a new request starts in DIAJUKAN without a letter number.
///
/// Expected: Ok(Document) with status Submitted
#[tokio::test]
async fn creates_submitted_request() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, user) = factory::helpers::create_household(db, 1).await?;

    let document = DocumentRepository::new(db)
        .create(NewDocument {
            resident_id: resident.id,
            requested_by: user.id,
            document_type: DocumentType::Business,
            purpose: "Pengajuan kredit usaha".to_string(),
            attachment_path: Some("documents/abc.pdf".to_string()),
        })
        .await?;

    assert_eq!(document.status, DocumentStatus::Submitted);
    assert_eq!(document.document_type, DocumentType::Business);
    assert_eq!(document.letter_number, None);
    assert_eq!(document.attachment_path.as_deref(), Some("documents/abc.pdf"));

    Ok(())
}

/// Tests withdrawing, which only deletes requests still in DIAJUKAN.
///
/// Expected: processed request kept, submitted request removed
#[tokio::test]
async fn deletes_only_submitted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, resident, user) = factory::helpers::create_household(db, 1).await?;
    let submitted = factory::create_document(db, resident.id, user.id).await?;
    let processing = factory::document::DocumentFactory::new(db, resident.id, user.id)
        .status("DIPROSES")
        .build()
        .await?;
    let repo = DocumentRepository::new(db);

    assert!(repo.delete_submitted(submitted.id).await?);
    assert!(!repo.delete_submitted(processing.id).await?);
    assert!(repo.find_by_id(submitted.id).await?.is_none());
    assert!(repo.find_by_id(processing.id).await?.is_some());

    Ok(())
}
