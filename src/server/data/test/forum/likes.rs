use super::*;

/// Tests toggling a like on and off.
///
/// Expected: true then false, count follows
#[tokio::test]
async fn toggles_like() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let author = factory::user::create_rw_user(db, 1).await?;
    let reader = factory::create_user(db).await?;
    let post = factory::forum::create_post(db, author.id, 1).await?;
    let repo = LikeRepository::new(db);

    assert!(repo.toggle(post.id, reader.id).await?);
    assert!(repo.exists(post.id, reader.id).await?);
    assert_eq!(repo.count(post.id).await?, 1);

    assert!(!repo.toggle(post.id, reader.id).await?);
    assert!(!repo.exists(post.id, reader.id).await?);
    assert_eq!(repo.count(post.id).await?, 0);

    Ok(())
}
