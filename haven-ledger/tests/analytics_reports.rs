//! Read statistics and abuse reports.
mod common;

use common::Fixture;
use haven_ledger::{ForbiddenReason, LedgerError};

#[tokio::test]
async fn test_reads_are_recorded_per_reader() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Popular").await;

    fixture.ledger.get_article(&article.slug, Some(&reader)).await.unwrap();
    fixture.ledger.get_article(&article.slug, Some(&reader)).await.unwrap();
    fixture.ledger.get_article(&article.slug, None).await.unwrap();

    let mine = fixture.ledger.my_reads(&reader).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user.as_deref(), Some("reader"));
    assert_eq!(mine[0].article.total_views, 2);

    let authored = fixture.ledger.reads_of_my_articles(&author).await.unwrap();
    assert_eq!(authored.len(), 2);
}

#[tokio::test]
async fn test_mark_read_transitions() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Long read").await;

    let err = fixture.ledger.mark_read(&reader, &article.slug, true).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    fixture.ledger.get_article(&article.slug, Some(&reader)).await.unwrap();
    let err = fixture.ledger.mark_read(&reader, &article.slug, false).await.unwrap_err();
    assert_eq!(err.to_string(), "You cannot unread an article.");

    let read = fixture.ledger.mark_read(&reader, &article.slug, true).await.unwrap();
    assert!(read.full_read);

    let err = fixture.ledger.mark_read(&reader, &article.slug, true).await.unwrap_err();
    assert_eq!(err.to_string(), "The reading report is already up to date.");
}

#[tokio::test]
async fn test_reports() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Controversial").await;

    let err = fixture
        .ledger
        .report_article(&author, &article.slug, "spam".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::OwnArticle(_))));

    let err = fixture.ledger.report_article(&reader, &article.slug, " ".to_string()).await.unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let report = fixture
        .ledger
        .report_article(&reader, &article.slug, "plagiarism".to_string())
        .await
        .unwrap();
    assert_eq!(report.author, "reader");
    assert_eq!(fixture.ledger.list_article_reports(&article.slug).await.unwrap().len(), 1);

    let err = fixture.ledger.get_report(&author, report.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::NotOwner)));

    let updated = fixture
        .ledger
        .update_report(&reader, report.id, "copied from elsewhere".to_string())
        .await
        .unwrap();
    assert_eq!(updated.reason, "copied from elsewhere");

    fixture.ledger.delete_report(&reader, report.id).await.unwrap();
    assert!(fixture.ledger.list_my_reports(&reader).await.unwrap().is_empty());
}
