use super::*;

/// Tests creating a program.
///
/// Expected: type parsed back and program active
#[tokio::test]
async fn creates_program() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let creator = factory::user::create_rw_user(db, 1).await?;

    let program = AssistanceRepository::new(db)
        .create(
            AssistanceParams {
                name: "Sembako Ramadhan".to_string(),
                description: None,
                assistance_type: AssistanceType::Sembako,
                source: Some("Swadaya".to_string()),
                amount: None,
                period_start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                period_end: None,
                rw: Some(1),
            },
            creator.id,
        )
        .await?;

    assert_eq!(program.assistance_type, AssistanceType::Sembako);
    assert_eq!(program.rw, Some(1));
    assert_eq!(program.created_by, creator.id);

    Ok(())
}

/// Tests program visibility by RW.
///
/// Expected: RW 1 sees its own and RW-wide programs, ADMIN sees all
#[tokio::test]
async fn lists_programs_for_rw() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_portal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    factory::assistance::create_assistance(db, admin.id).await?;
    factory::assistance::AssistanceFactory::new(db, admin.id)
        .rw(1)
        .build()
        .await?;
    factory::assistance::AssistanceFactory::new(db, admin.id)
        .rw(2)
        .build()
        .await?;
    factory::assistance::AssistanceFactory::new(db, admin.id)
        .is_active(false)
        .build()
        .await?;
    let repo = AssistanceRepository::new(db);

    let rw_page = repo
        .get_paginated(PageRequest::default(), &Scope::Rw { rw: 1 })
        .await?;
    let all_page = repo
        .get_paginated(PageRequest::default(), &Scope::All)
        .await?;

    assert_eq!(rw_page.total, 2);
    assert_eq!(all_page.total, 3);

    Ok(())
}
