use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use shortlinks::domain::entities::{FlagOutcome, NewLink};
use shortlinks::domain::repositories::{
    FeedbackRepository, LinkRepository, SuspectRepository, UserRepository,
};
use shortlinks::infrastructure::persistence::{
    PgFeedbackRepository, PgLinkRepository, PgSuspectRepository, PgUserRepository,
};

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_ensure_user_is_idempotent(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let first = repo.ensure(42).await.unwrap();
    let second = repo.ensure(42).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.telegram_id, 42);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_flag_once_per_link(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = PgUserRepository::new(pool.clone()).ensure(1).await.unwrap();
    let link = PgLinkRepository::new(pool.clone())
        .create(NewLink {
            owner_id: owner.id,
            original_url: "https://bad.example".to_string(),
            short_code: "bad1".to_string(),
            expires_at: Utc::now() + Duration::days(1),
        })
        .await
        .unwrap();
    let suspects = PgSuspectRepository::new(pool);

    assert_eq!(
        suspects.flag(link.id, "bad1").await.unwrap(),
        FlagOutcome::Flagged
    );
    assert_eq!(
        suspects.flag(link.id, "bad1").await.unwrap(),
        FlagOutcome::AlreadyFlagged
    );

    let listed = suspects.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].short_code, "bad1");
    assert_eq!(listed[0].original_url, "https://bad.example");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_grades_and_reviews(pool: PgPool) {
    let pool = Arc::new(pool);
    let users = PgUserRepository::new(pool.clone());
    let feedback = PgFeedbackRepository::new(pool);

    assert_eq!(feedback.average_grade().await.unwrap(), None);

    users.ensure(1).await.unwrap();
    feedback.save_grade(1, 4).await.unwrap();
    feedback.save_grade(1, 5).await.unwrap();
    assert_eq!(feedback.average_grade().await.unwrap(), Some(4.5));

    feedback.save_review(1, "handy").await.unwrap();
    feedback.save_review(1, "fast").await.unwrap();
    let reviews = feedback.latest_reviews(1).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].review, "fast");
    assert_eq!(reviews[0].telegram_id, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_feedback_from_unknown_user_is_rejected(pool: PgPool) {
    let feedback = PgFeedbackRepository::new(Arc::new(pool));

    assert!(feedback.save_grade(777, 3).await.is_err());
    assert!(feedback.save_review(777, "hello").await.is_err());
}
