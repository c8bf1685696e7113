//! Ratings and the derived average.
mod common;

use common::Fixture;
use haven_ledger::{ForbiddenReason, LedgerConfig, LedgerError, RatingChanges, RatingScope};
use haven_shared::types::NotificationKind;

#[tokio::test]
async fn test_self_rating_is_forbidden_for_every_value() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let article = fixture.article(&author, "Mine").await;

    for value in 1..=5 {
        let err = fixture
            .ledger
            .submit_rating(&author, &article.slug, value, String::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Forbidden(ForbiddenReason::OwnArticle("cannot rate own article"))
        ));
    }
}

#[tokio::test]
async fn test_second_rating_is_a_conflict() {
    let mut fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Rate me").await;

    let rating = fixture
        .ledger
        .submit_rating(&reader, &article.slug, 4, "solid".to_string())
        .await
        .unwrap();
    assert_eq!(rating.author, "reader");
    assert_eq!(rating.slug, article.slug);

    let err = fixture
        .ledger
        .submit_rating(&reader, &article.slug, 2, String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(ref message) if message == "cannot rate an article twice"));
    assert_eq!(fixture.ledger.list_ratings(&article.slug).await.unwrap().len(), 1);

    let emitted = fixture.drain();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].kind, NotificationKind::ArticleRated);
}

#[tokio::test]
async fn test_rating_range_is_validated() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Range").await;

    for value in [0, 6, 40_000] {
        let err = fixture
            .ledger
            .submit_rating(&reader, &article.slug, value, String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(ref message) if message == "please keep range of rating from 1-5"));
    }
}

#[tokio::test]
async fn test_unrated_article_lists_as_not_found() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let article = fixture.article(&author, "Quiet").await;

    let err = fixture.ledger.list_ratings(&article.slug).await.unwrap_err();
    assert_eq!(err.to_string(), "no ratings for this article present");
    assert_eq!(fixture.ledger.average_rating(article.id).await.unwrap(), 0.0);
}

#[tokio::test]
async fn test_average_is_rounded_and_scoped_to_article() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let first = fixture.article(&author, "First").await;
    let second = fixture.article(&author, "Second").await;

    for (name, value) in [("a", 4), ("b", 4), ("c", 3)] {
        let rater = fixture.actor(name).await;
        fixture.ledger.submit_rating(&rater, &first.slug, value, String::new()).await.unwrap();
    }
    let other = fixture.actor("d").await;
    fixture.ledger.submit_rating(&other, &second.slug, 1, String::new()).await.unwrap();

    // 11 / 3 = 3.666..
    assert_eq!(fixture.ledger.average_rating(first.id).await.unwrap(), 3.7);
    assert_eq!(fixture.ledger.average_rating(second.id).await.unwrap(), 1.0);
    let view = fixture.ledger.get_article(&first.slug, None).await.unwrap();
    assert_eq!(view.average_rating, 3.7);
}

#[tokio::test]
async fn test_global_scope_averages_every_rating() {
    let fixture = Fixture::with_config(LedgerConfig { rating_scope: RatingScope::Global });
    let author = fixture.actor("author").await;
    let first = fixture.article(&author, "First").await;
    let second = fixture.article(&author, "Second").await;
    let reader = fixture.actor("reader").await;

    fixture.ledger.submit_rating(&reader, &first.slug, 5, String::new()).await.unwrap();
    fixture.ledger.submit_rating(&reader, &second.slug, 2, String::new()).await.unwrap();

    assert_eq!(fixture.ledger.average_rating(first.id).await.unwrap(), 3.5);
    assert_eq!(fixture.ledger.average_rating(second.id).await.unwrap(), 3.5);
}

#[tokio::test]
async fn test_only_owner_updates_or_deletes_rating() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let stranger = fixture.actor("stranger").await;
    let article = fixture.article(&author, "Owned").await;
    let rating = fixture.ledger.submit_rating(&reader, &article.slug, 3, String::new()).await.unwrap();

    let changes = RatingChanges { value: Some(5), review: None };
    let err = fixture.ledger.update_rating(&stranger, rating.id, changes.clone()).await.unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::NotOwner)));

    let updated = fixture.ledger.update_rating(&reader, rating.id, changes).await.unwrap();
    assert_eq!(updated.value, 5);

    let invalid = RatingChanges { value: Some(9), review: None };
    assert!(matches!(
        fixture.ledger.update_rating(&reader, rating.id, invalid).await.unwrap_err(),
        LedgerError::Validation(_)
    ));

    assert!(fixture.ledger.delete_rating(&stranger, rating.id).await.is_err());
    fixture.ledger.delete_rating(&reader, rating.id).await.unwrap();
    assert!(matches!(
        fixture.ledger.get_rating(rating.id).await.unwrap_err(),
        LedgerError::NotFound(_)
    ));
}
