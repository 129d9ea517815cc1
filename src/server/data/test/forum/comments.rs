use super::*;

/// Tests adding comments and listing them oldest first.
///
/// Expected: both comments in insertion order
#[tokio::test]
async fn lists_comments_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_rw_user(db, 1).await?;
    let post = factory::forum::create_post(db, user.id, 1).await?;
    let repo = CommentRepository::new(db);

    let first = repo.create(post.id, user.id, "Pertama".to_string()).await?;
    let second = repo.create(post.id, user.id, "Kedua".to_string()).await?;

    let comments = repo.get_by_post(post.id).await?;
    let ids: Vec<i32> = comments.iter().map(|c| c.id).collect();

    assert_eq!(ids, vec![first.id, second.id]);
    assert!(repo.deactivate(first.id).await?);
    assert!(repo.find_by_id(first.id).await?.is_none());
    assert_eq!(repo.get_by_post(post.id).await?.len(), 1);

    Ok(())
}
