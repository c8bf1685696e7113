//! Articles, comments and the cascade on deletion.
mod common;

use common::Fixture;
use haven_ledger::{ForbiddenReason, HighlightRequest, LedgerError, TargetRef};
use haven_repository::{BookmarksRepository, HighlightsRepository, RatingsRepository, VotesRepository};
use haven_shared::types::{ArticleChanges, NewArticle, NewComment, NotificationKind, Target, VoteValue};

#[tokio::test]
async fn test_slugs_stay_unique() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;

    let first = fixture.article(&author, "Hello World").await;
    let second = fixture.article(&author, "Hello, World!").await;
    let third = fixture.article(&author, "hello world").await;

    assert_eq!(first.slug, "hello-world");
    assert_eq!(second.slug, "hello-world-1");
    assert_eq!(third.slug, "hello-world-2");
}

#[tokio::test]
async fn test_title_change_reslugs() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let article = fixture.article(&author, "Draft title").await;

    let changes = ArticleChanges { title: Some("Final title".to_string()), ..Default::default() };
    let updated = fixture.ledger.update_article(&author, &article.slug, changes).await.unwrap();
    assert_eq!(updated.slug, "final-title");

    let err = fixture.ledger.get_article("draft-title", None).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
    assert_eq!(fixture.ledger.get_article("final-title", None).await.unwrap().id, article.id);
}

#[tokio::test]
async fn test_route_words_are_never_slugs() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;

    let me = fixture.article(&author, "Me").await;
    let id = fixture.article(&author, "ID").await;
    assert_eq!(me.slug, "me-1");
    assert_eq!(id.slug, "id-1");

    let draft = fixture.article(&author, "Draft").await;
    let changes = ArticleChanges { title: Some("me".to_string()), ..Default::default() };
    let renamed = fixture.ledger.update_article(&author, &draft.slug, changes).await.unwrap();
    assert_eq!(renamed.slug, "me-2");
}

#[tokio::test]
async fn test_publish_requires_verified_actor_and_fields() {
    let fixture = Fixture::new();
    let lurker = fixture.unverified_actor("lurker").await;
    let author = fixture.actor("author").await;
    let new = NewArticle {
        title: "Title".to_string(),
        description: "Description".to_string(),
        body: "Body".to_string(),
    };

    let err = fixture.ledger.publish_article(&lurker, new.clone()).await.unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::Unverified)));

    let blank = NewArticle { body: "  ".to_string(), ..new };
    let err = fixture.ledger.publish_article(&author, blank).await.unwrap_err();
    assert_eq!(err.to_string(), "body may not be blank.");
}

#[tokio::test]
async fn test_only_author_edits_or_deletes() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let stranger = fixture.actor("stranger").await;
    let article = fixture.article(&author, "Guarded").await;

    let err = fixture
        .ledger
        .update_article(&stranger, &article.slug, ArticleChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::NotOwner)));
    let err = fixture.ledger.delete_article(&stranger, &article.slug).await.unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::NotOwner)));
}

#[tokio::test]
async fn test_delete_article_cascades() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Doomed").await;
    let slug = article.slug.clone();

    let comment = fixture
        .ledger
        .add_comment(&reader, &slug, NewComment { body: "first".to_string(), parent_id: None })
        .await
        .unwrap();
    fixture.ledger.submit_vote(&reader, &TargetRef::Article { slug: slug.clone() }, VoteValue::Like).await.unwrap();
    fixture
        .ledger
        .submit_vote(&author, &TargetRef::Comment { slug: slug.clone(), comment_id: comment.id }, VoteValue::Like)
        .await
        .unwrap();
    fixture.ledger.submit_rating(&reader, &slug, 5, String::new()).await.unwrap();
    fixture.ledger.add_favorite(&reader, &slug).await.unwrap();
    fixture.ledger.add_bookmark(&reader, &slug).await.unwrap();
    let request = HighlightRequest { start_index: 0, end_index: 3, comment: String::new(), private: false };
    fixture.ledger.toggle_highlight(&reader, &slug, request).await.unwrap();

    fixture.ledger.delete_article(&author, &slug).await.unwrap();

    let repository = &fixture.repository;
    assert!(repository.get_vote(reader.id, Target::Article(article.id)).await.unwrap().is_none());
    assert!(repository.get_vote(author.id, Target::Comment(comment.id)).await.unwrap().is_none());
    assert!(repository.list_ratings(article.id).await.unwrap().is_empty());
    assert!(fixture.ledger.list_favorites(&reader).await.unwrap().is_empty());
    assert!(repository.list_bookmarks(reader.id).await.unwrap().is_empty());
    assert!(repository.list_highlights(reader.id, None).await.unwrap().is_empty());
    assert!(matches!(
        fixture.ledger.get_article(&slug, None).await.unwrap_err(),
        LedgerError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_comment_notifies_author_and_favoriters() {
    let mut fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let fan = fixture.actor("fan").await;
    let commenter = fixture.actor("commenter").await;
    let article = fixture.article(&author, "Discussed").await;
    fixture.ledger.add_favorite(&fan, &article.slug).await.unwrap();
    fixture.ledger.add_favorite(&commenter, &article.slug).await.unwrap();

    let comment = fixture
        .ledger
        .add_comment(&commenter, &article.slug, NewComment { body: "hm".to_string(), parent_id: None })
        .await
        .unwrap();

    let emitted = fixture.drain();
    let mut recipients: Vec<_> = emitted.iter().map(|n| n.recipient_id).collect();
    recipients.sort();
    let mut expected = vec![author.id, fan.id];
    expected.sort();
    assert_eq!(recipients, expected);
    assert!(emitted.iter().all(|n| n.kind == NotificationKind::ArticleComment && n.object_id == comment.id));
}

#[tokio::test]
async fn test_comment_thread() {
    let fixture = Fixture::new();
    let author = fixture.actor("author").await;
    let reader = fixture.actor("reader").await;
    let article = fixture.article(&author, "Threads").await;

    let top = fixture
        .ledger
        .add_comment(&reader, &article.slug, NewComment { body: "top".to_string(), parent_id: None })
        .await
        .unwrap();
    let reply = fixture
        .ledger
        .add_comment(&author, &article.slug, NewComment { body: "reply".to_string(), parent_id: Some(top.id) })
        .await
        .unwrap();

    let tops = fixture.ledger.list_comments(&article.slug, None).await.unwrap();
    assert_eq!(tops.len(), 1);
    let replies = fixture.ledger.list_comments(&article.slug, Some(top.id)).await.unwrap();
    assert_eq!(replies[0].id, reply.id);

    let err = fixture
        .ledger
        .edit_comment(&author, &article.slug, top.id, "hijack".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::NotOwner)));
    let edited = fixture
        .ledger
        .edit_comment(&reader, &article.slug, top.id, "edited".to_string())
        .await
        .unwrap();
    assert_eq!(edited.body, "edited");

    fixture.ledger.delete_comment(&reader, &article.slug, top.id).await.unwrap();
    assert!(fixture.ledger.get_comment(&article.slug, reply.id).await.is_err());
}
