use super::*;

/// Tests linking residents to a family and detaching them all.
///
/// Expected: head listed first, members cleared after detach
#[tokio::test]
async fn links_and_detaches_members() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_residency_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let rt = factory::create_rt(db).await?;
    let family = factory::create_family(db, rt.id).await?;
    let child = factory::resident::ResidentFactory::new(db, rt.id)
        .name("Ani")
        .build()
        .await?;
    let head = factory::resident::ResidentFactory::new(db, rt.id)
        .name("Zainal")
        .build()
        .await?;
    let repo = ResidentRepository::new(db);

    repo.set_family(child.id, Some((family.id, FamilyRole::Child)))
        .await?;
    repo.set_family(head.id, Some((family.id, FamilyRole::Head)))
        .await?;

    let members = repo.get_by_family(family.id).await?;
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].id, head.id);
    assert_eq!(members[1].family_role, Some(FamilyRole::Child));

    assert_eq!(repo.detach_family(family.id).await?, 2);
    assert!(repo.get_by_family(family.id).await?.is_empty());

    Ok(())
}
