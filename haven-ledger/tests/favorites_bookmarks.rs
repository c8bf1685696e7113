//! Favorites and bookmarks: one per actor and article.
mod common;

use common::Fixture;
use haven_ledger::LedgerError;
use uuid::Uuid;

#[tokio::test]
async fn test_favorite_lifecycle() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Keeper").await;

    let added = fixture.ledger.add_favorite(&reader, &article.slug).await.unwrap();
    assert_eq!(added.message, "Article added to favorites.");
    assert_eq!(added.user_id, reader.id);

    let err = fixture.ledger.add_favorite(&reader, &article.slug).await.unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(ref message) if message == "Article already in favorites."));

    let view = fixture.ledger.get_favorite(&reader, &article.slug).await.unwrap();
    assert_eq!(view.slug, article.slug);
    let listed = fixture.ledger.list_favorites(&reader).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author.username, "author");

    let message = fixture.ledger.remove_favorite(&reader, &article.slug).await.unwrap();
    assert_eq!(message, "Article removed from favorites");

    let err = fixture.ledger.remove_favorite(&reader, &article.slug).await.unwrap_err();
    assert_eq!(err.to_string(), "Article not favorite");
    let err = fixture.ledger.get_favorite(&reader, &article.slug).await.unwrap_err();
    assert_eq!(err.to_string(), "Article not favorited");
}

#[tokio::test]
async fn test_favorite_unknown_article() {
    let fixture = Fixture::new();
    let reader = fixture.actor("reader").await;

    let err = fixture.ledger.add_favorite(&reader, "ghost").await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(ref message) if message == "This article has not been found."));
}

#[tokio::test]
async fn test_bookmark_lifecycle() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Later").await;

    let bookmark = fixture.ledger.add_bookmark(&reader, &article.slug).await.unwrap();
    assert_eq!(bookmark.article.slug, article.slug);
    assert_eq!(bookmark.article.author, "author");

    let err = fixture.ledger.add_bookmark(&reader, &article.slug).await.unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(ref message) if message == "The article has already been bookmarked."));
    assert_eq!(fixture.ledger.list_bookmarks(&reader).await.unwrap().len(), 1);

    // Someone else's bookmark looks missing.
    let err = fixture.ledger.remove_bookmark(&author, bookmark.id).await.unwrap_err();
    assert_eq!(err.to_string(), "The bookmark does not exist.");

    fixture.ledger.remove_bookmark(&reader, bookmark.id).await.unwrap();
    assert!(fixture.ledger.list_bookmarks(&reader).await.unwrap().is_empty());
    let err = fixture.ledger.remove_bookmark(&reader, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}
