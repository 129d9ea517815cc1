use super::*;

/// Tests counting the workload of an RT.
///
/// Expected: only active residents and families, pending documents and open complaints
#[tokio::test]
async fn counts_rt_workload() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (rt, _, resident, user) = factory::helpers::create_household(db, 1).await?;
    factory::resident::ResidentFactory::new(db, rt.id)
        .is_active(false)
        .build()
        .await?;
    factory::create_document(db, resident.id, user.id).await?;
    factory::document::DocumentFactory::new(db, resident.id, user.id)
        .status("SELESAI")
        .build()
        .await?;
    factory::complaint::create_complaint(db, user.id, rt.id).await?;
    factory::complaint::ComplaintFactory::new(db, user.id, rt.id)
        .status("DITOLAK")
        .build()
        .await?;

    let (other_rt, _, other_resident, other_user) =
        factory::helpers::create_household(db, 1).await?;
    factory::create_document(db, other_resident.id, other_user.id).await?;
    factory::complaint::create_complaint(db, other_user.id, other_rt.id).await?;

    let summary = RtRepository::new(db).summary(rt.id).await?;

    assert_eq!(summary.residents, 1);
    assert_eq!(summary.families, 1);
    assert_eq!(summary.pending_documents, 1);
    assert_eq!(summary.open_complaints, 1);

    Ok(())
}
