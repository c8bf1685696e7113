//! Integration tests for the PostgreSQL haven repository.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test --test postgres_integration -- --ignored`

use std::sync::Arc;

use chrono::{Duration, Utc};
use haven_repository::{
    ActorsRepository, AnalyticsRepository, ArticlesRepository, BookmarksRepository,
    FavoritesRepository, HighlightsRepository, PostgresRepository, RatingsRepository,
    RepositoryError, VotesRepository,
};
use haven_shared::types::{
    Actor, Article, Bookmark, Comment, Favorite, HighlightToggle, NewHighlight, Rating, Target,
    TargetKind, VoteTransition, VoteValue, VotesCount,
};
use uuid::Uuid;

/// Creates a verified actor with a unique username.
fn make_actor() -> Actor {
    let id = Uuid::new_v4();
    Actor {
        id,
        username: format!("user-{}", id.simple()),
        email: format!("{}@haven.test", id.simple()),
        bio: String::new(),
        image: None,
        is_verified: true,
    }
}

/// Creates an article owned by `author_id`.
fn make_article(author_id: Uuid, slug: &str) -> Article {
    let now = Utc::now();
    Article {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: "Title".to_string(),
        description: "Description".to_string(),
        body: "Body of the article".to_string(),
        author_id,
        created_at: now,
        updated_at: now,
    }
}

async fn seed(repository: &PostgresRepository) -> (Actor, Actor, Article) {
    let author = make_actor();
    let reader = make_actor();
    let article = make_article(author.id, "seeded-article");
    repository.insert_actor(&author).await.unwrap();
    repository.insert_actor(&reader).await.unwrap();
    repository.insert_article(&article).await.unwrap();
    (author, reader, article)
}

// ============================================================================
// Votes
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_apply_vote_transitions(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (_, reader, article) = seed(&repository).await;
    let target = Target::Article(article.id);

    assert_eq!(
        repository.apply_vote(reader.id, target, VoteValue::Like).await.unwrap(),
        VoteTransition::Created
    );
    assert_eq!(
        repository.apply_vote(reader.id, target, VoteValue::Dislike).await.unwrap(),
        VoteTransition::Switched
    );
    assert_eq!(
        repository.count_votes(target).await.unwrap(),
        VotesCount { like_count: 0, dislike_count: 1 }
    );
    assert_eq!(
        repository.apply_vote(reader.id, target, VoteValue::Dislike).await.unwrap(),
        VoteTransition::Removed
    );
    assert!(repository.get_vote(reader.id, target).await.unwrap().is_none());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_identical_votes_never_duplicate(pool: sqlx::PgPool) {
    let repository = Arc::new(PostgresRepository::new(pool));
    let (_, reader, article) = seed(&repository).await;
    let target = Target::Article(article.id);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move { repository.apply_vote(reader.id, target, VoteValue::Like).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Eight alternating toggles from the same actor end with no vote.
    let count = repository.count_votes(target).await.unwrap();
    assert_eq!(count.dislike_count, 0);
    assert_eq!(count.like_count, 0);
}

// ============================================================================
// Uniqueness and cascades
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_unique_constraints_map_to_conflict(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (author, reader, article) = seed(&repository).await;

    let clash = make_article(author.id, "seeded-article");
    assert!(matches!(
        repository.insert_article(&clash).await.unwrap_err(),
        RepositoryError::Conflict("slug")
    ));

    let now = Utc::now();
    let rating = Rating {
        id: Uuid::new_v4(),
        author_id: reader.id,
        article_id: article.id,
        value: 5,
        review: String::new(),
        created_at: now,
        updated_at: now,
    };
    repository.insert_rating(&rating).await.unwrap();
    let again = Rating { id: Uuid::new_v4(), ..rating };
    assert!(repository.insert_rating(&again).await.unwrap_err().is_conflict());
    assert_eq!(repository.average_rating(Some(article.id)).await.unwrap(), Some(5.0));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_delete_article_cascades(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (_, reader, article) = seed(&repository).await;
    let now = Utc::now();

    let comment = Comment {
        id: Uuid::new_v4(),
        article_id: article.id,
        author_id: reader.id,
        body: "first".to_string(),
        parent_id: None,
        created_at: now,
        updated_at: now,
    };
    repository.insert_comment(&comment).await.unwrap();
    repository.apply_vote(reader.id, Target::Article(article.id), VoteValue::Like).await.unwrap();
    repository.apply_vote(reader.id, Target::Comment(comment.id), VoteValue::Like).await.unwrap();
    repository
        .insert_favorite(&Favorite { id: Uuid::new_v4(), actor_id: reader.id, article_id: article.id, created_at: now })
        .await
        .unwrap();
    repository.record_read(article.id, Some(reader.id)).await.unwrap();

    assert!(repository.delete_article(article.id).await.unwrap());

    assert!(repository.get_comment(comment.id).await.unwrap().is_none());
    assert_eq!(repository.count_votes(Target::Comment(comment.id)).await.unwrap(), VotesCount::default());
    assert!(repository.get_favorite(reader.id, article.id).await.unwrap().is_none());
    assert_eq!(repository.count_reads(article.id).await.unwrap(), 0);
}

// ============================================================================
// Highlights and reads
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_toggle_highlight(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (_, reader, article) = seed(&repository).await;
    let submitted = NewHighlight {
        actor_id: reader.id,
        article_id: article.id,
        start_index: 0,
        end_index: 4,
        comment: String::new(),
        private: false,
        article_version: article.updated_at,
    };

    assert!(matches!(
        repository.toggle_highlight(&submitted).await.unwrap(),
        HighlightToggle::Added(_)
    ));
    assert_eq!(repository.list_public_highlights(article.id).await.unwrap().len(), 1);
    assert_eq!(repository.toggle_highlight(&submitted).await.unwrap(), HighlightToggle::Removed);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_body_edit_purges_highlights_in_the_same_update(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (_, reader, mut article) = seed(&repository).await;
    let submitted = NewHighlight {
        actor_id: reader.id,
        article_id: article.id,
        start_index: 0,
        end_index: 4,
        comment: String::new(),
        private: false,
        article_version: article.updated_at,
    };
    repository.toggle_highlight(&submitted).await.unwrap();

    article.description = "Edited".to_string();
    article.updated_at = article.updated_at + Duration::seconds(1);
    assert_eq!(repository.update_article(&article, false).await.unwrap(), 0);
    assert_eq!(repository.list_highlights(reader.id, None).await.unwrap().len(), 1);

    article.body = "A rewritten body".to_string();
    article.updated_at = article.updated_at + Duration::seconds(1);
    assert_eq!(repository.update_article(&article, true).await.unwrap(), 1);
    assert!(repository.list_highlights(reader.id, None).await.unwrap().is_empty());

    // Validated against the body before the edit.
    let err = repository.toggle_highlight(&submitted).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Stale("article")));
    assert!(repository.list_highlights(reader.id, None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_vote_on_deleted_target_is_refused(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (author, reader, article) = seed(&repository).await;
    let now = Utc::now();
    let comment = Comment {
        id: Uuid::new_v4(),
        article_id: article.id,
        author_id: author.id,
        body: "First!".to_string(),
        parent_id: None,
        created_at: now,
        updated_at: now,
    };
    repository.insert_comment(&comment).await.unwrap();

    repository.delete_comment(comment.id).await.unwrap();
    let err = repository
        .apply_vote(reader.id, Target::Comment(comment.id), VoteValue::Like)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::TargetNotFound(TargetKind::Comment)));

    repository.delete_article(article.id).await.unwrap();
    let target = Target::Article(article.id);
    let err = repository.apply_vote(reader.id, target, VoteValue::Dislike).await.unwrap_err();
    assert!(matches!(err, RepositoryError::TargetNotFound(TargetKind::Article)));
    assert_eq!(repository.count_votes(target).await.unwrap(), VotesCount::default());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_bookmarks_round_trip(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (_, reader, article) = seed(&repository).await;
    let bookmark = Bookmark {
        id: Uuid::new_v4(),
        actor_id: reader.id,
        article_id: article.id,
        created_at: Utc::now(),
    };
    repository.insert_bookmark(&bookmark).await.unwrap();

    let listed = repository.list_bookmarks(reader.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, bookmark.id);
    assert_eq!(listed[0].article_id, article.id);

    let err = repository
        .insert_bookmark(&Bookmark { id: Uuid::new_v4(), ..bookmark.clone() })
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict("bookmark")));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_record_read_is_idempotent_for_readers(pool: sqlx::PgPool) {
    let repository = PostgresRepository::new(pool);
    let (_, reader, article) = seed(&repository).await;

    let first = repository.record_read(article.id, Some(reader.id)).await.unwrap();
    let second = repository.record_read(article.id, Some(reader.id)).await.unwrap();
    assert_eq!(first.id, second.id);

    repository.record_read(article.id, None).await.unwrap();
    repository.record_read(article.id, None).await.unwrap();
    assert_eq!(repository.count_reads(article.id).await.unwrap(), 3);
}
