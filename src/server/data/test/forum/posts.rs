use super::*;

/// Tests creating a post scoped to one RT.
///
/// Expected: unpinned post carrying RW and RT
#[tokio::test]
async fn creates_post() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (rt, _, _, user) = factory::helpers::create_household(db, 1).await?;

    let post = PostRepository::new(db)
        .create(
            PostParams {
                title: "Kucing hilang".to_string(),
                content: "Kucing oranye hilang di gang 2".to_string(),
                category: ForumCategory::LostAndFound,
            },
            user.id,
            1,
            Some(rt.id),
        )
        .await?;

    assert!(!post.is_pinned);
    assert_eq!(post.rt_id, Some(rt.id));
    assert_eq!(post.category, ForumCategory::LostAndFound);

    Ok(())
}

/// Tests ordering: pinned first, then newest.
///
/// Expected: pinned old post, new post, old post
#[tokio::test]
async fn orders_pinned_then_newest() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_rw_user(db, 1).await?;
    let now = Utc::now();

    let old = factory::forum::PostFactory::new(db, user.id, 1)
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let pinned = factory::forum::PostFactory::new(db, user.id, 1)
        .created_at(now - Duration::days(3))
        .pinned(true)
        .build()
        .await?;
    let new = factory::forum::PostFactory::new(db, user.id, 1)
        .created_at(now)
        .build()
        .await?;

    let page = PostRepository::new(db)
        .get_paginated(PageRequest::default(), None, &Scope::Rw { rw: 1 })
        .await?;

    let ids: Vec<i32> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![pinned.id, new.id, old.id]);

    Ok(())
}

/// Tests category filtering and RW visibility.
///
/// Expected: only the announcement of RW 1
#[tokio::test]
async fn filters_by_category_and_area() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_rw_user(db, 1).await?;

    let announcement = factory::forum::PostFactory::new(db, user.id, 1)
        .category("PENGUMUMAN")
        .build()
        .await?;
    factory::forum::create_post(db, user.id, 1).await?;
    factory::forum::PostFactory::new(db, user.id, 2)
        .category("PENGUMUMAN")
        .build()
        .await?;

    let page = PostRepository::new(db)
        .get_paginated(
            PageRequest::default(),
            Some(ForumCategory::Announcement),
            &Scope::Rw { rw: 1 },
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, announcement.id);

    Ok(())
}

/// Tests pinning, counts and soft delete.
///
/// Expected: counts ignore deleted comments, deleted post hidden
#[tokio::test]
async fn pins_counts_and_deactivates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::create_rw_user(db, 1).await?;
    let post = factory::forum::create_post(db, user.id, 1).await?;
    factory::forum::create_comment(db, post.id, user.id).await?;
    let removed = factory::forum::create_comment(db, post.id, user.id).await?;
    factory::forum::create_like(db, post.id, user.id).await?;
    let repo = PostRepository::new(db);

    CommentRepository::new(db).deactivate(removed.id).await?;
    repo.set_pinned(post.id, true).await?;

    assert!(repo.find_by_id(post.id).await?.unwrap().is_pinned);
    assert_eq!(repo.comment_counts(&[post.id]).await?.get(&post.id), Some(&1));
    assert_eq!(repo.like_counts(&[post.id]).await?.get(&post.id), Some(&1));

    assert!(repo.deactivate(post.id).await?);
    assert!(repo.find_by_id(post.id).await?.is_none());

    Ok(())
}
