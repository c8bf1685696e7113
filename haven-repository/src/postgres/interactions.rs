//! Votes, ratings, favorites, bookmarks and highlights on PostgreSQL.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use haven_shared::types::{
    ActorId, Article, Bookmark, Favorite, Highlight, HighlightToggle, NewHighlight, Rating, Target,
    TargetKind, Vote, VoteTransition, VoteValue, VotesCount,
};
use uuid::Uuid;

use super::rows::{
    ArticleRow, BookmarkRow, FavoriteRow, HIGHLIGHT_COLUMNS, HighlightRow, RATING_COLUMNS,
    RatingRow, VoteRow,
};
use super::{MAX_TOGGLE_ATTEMPTS, PostgresRepository};
use crate::errors::RepositoryError;
use crate::interfaces::{
    BookmarksRepository, FavoritesRepository, HighlightsRepository, RatingsRepository,
    VotesRepository,
};

#[async_trait]
impl VotesRepository for PostgresRepository {
    /// Runs the toggle in a single transaction.
    ///
    /// The target row is key-share locked first, so a concurrent delete of
    /// the article or comment either waits for the vote and then removes it,
    /// or commits first and the vote is refused.
    ///
    /// The insert wins when no vote exists. Otherwise the stored row is locked
    /// with `FOR UPDATE` so the transition is computed from the value that
    /// concurrent writers have already committed. If the row disappears between
    /// the insert attempt and the lock, the whole step is retried.
    async fn apply_vote(
        &self,
        actor_id: ActorId,
        target: Target,
        value: VoteValue,
    ) -> Result<VoteTransition, RepositoryError> {
        let kind = target.kind().as_i16();
        let target_id = target.id();

        let lock_target = match target.kind() {
            TargetKind::Article => "SELECT 1 FROM articles WHERE id = $1 FOR KEY SHARE",
            TargetKind::Comment => "SELECT 1 FROM comments WHERE id = $1 FOR KEY SHARE",
        };

        for _ in 0..MAX_TOGGLE_ATTEMPTS {
            let mut tx = self.pool.begin().await?;

            let present: Option<i32> = sqlx::query_scalar(lock_target)
                .bind(target_id)
                .fetch_optional(&mut *tx)
                .await?;
            if present.is_none() {
                tx.rollback().await?;
                return Err(RepositoryError::TargetNotFound(target.kind()));
            }

            let inserted = sqlx::query(
                "INSERT INTO votes (actor_id, target_kind, target_id, value, voted_at)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (actor_id, target_kind, target_id) DO NOTHING",
            )
            .bind(actor_id)
            .bind(kind)
            .bind(target_id)
            .bind(value.as_i16())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if inserted == 1 {
                tx.commit().await?;
                return Ok(VoteTransition::Created);
            }

            let stored: Option<i16> = sqlx::query_scalar(
                "SELECT value FROM votes
                 WHERE actor_id = $1 AND target_kind = $2 AND target_id = $3
                 FOR UPDATE",
            )
            .bind(actor_id)
            .bind(kind)
            .bind(target_id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(stored) = stored else {
                tx.rollback().await?;
                continue;
            };
            let stored = VoteValue::try_from(stored).map_err(RepositoryError::InvalidVoteValue)?;

            let transition = VoteTransition::resolve(Some(stored), value);
            if transition == VoteTransition::Removed {
                sqlx::query("DELETE FROM votes WHERE actor_id = $1 AND target_kind = $2 AND target_id = $3")
                    .bind(actor_id)
                    .bind(kind)
                    .bind(target_id)
                    .execute(&mut *tx)
                    .await?;
            } else {
                sqlx::query(
                    "UPDATE votes SET value = $4, voted_at = $5
                     WHERE actor_id = $1 AND target_kind = $2 AND target_id = $3",
                )
                .bind(actor_id)
                .bind(kind)
                .bind(target_id)
                .bind(value.as_i16())
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            return Ok(transition);
        }

        Err(RepositoryError::Contention("vote"))
    }

    async fn get_vote(&self, actor_id: ActorId, target: Target) -> Result<Option<Vote>, RepositoryError> {
        let row = sqlx::query_as::<_, VoteRow>(
            "SELECT actor_id, target_kind, target_id, value, voted_at FROM votes
             WHERE actor_id = $1 AND target_kind = $2 AND target_id = $3",
        )
        .bind(actor_id)
        .bind(target.kind().as_i16())
        .bind(target.id())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Vote::try_from).transpose()
    }

    async fn count_votes(&self, target: Target) -> Result<VotesCount, RepositoryError> {
        let (like_count, dislike_count): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE value = 1), COUNT(*) FILTER (WHERE value = -1)
             FROM votes WHERE target_kind = $1 AND target_id = $2",
        )
        .bind(target.kind().as_i16())
        .bind(target.id())
        .fetch_one(&self.pool)
        .await?;
        Ok(VotesCount { like_count, dislike_count })
    }
}

#[async_trait]
impl RatingsRepository for PostgresRepository {
    async fn insert_rating(&self, rating: &Rating) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO ratings (id, author_id, article_id, value, review, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(rating.id)
        .bind(rating.author_id)
        .bind(rating.article_id)
        .bind(rating.value)
        .bind(&rating.review)
        .bind(rating.created_at)
        .bind(rating.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unique(e, "rating"))?;
        Ok(())
    }

    async fn get_rating(&self, id: Uuid) -> Result<Option<Rating>, RepositoryError> {
        let sql = format!("SELECT {RATING_COLUMNS} FROM ratings WHERE id = $1");
        let row = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Rating::from))
    }

    async fn update_rating(&self, rating: &Rating) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE ratings SET value = $2, review = $3, updated_at = $4 WHERE id = $1")
            .bind(rating.id)
            .bind(rating.value)
            .bind(&rating.review)
            .bind(rating.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_rating(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn list_ratings(&self, article_id: Uuid) -> Result<Vec<Rating>, RepositoryError> {
        let sql = format!("SELECT {RATING_COLUMNS} FROM ratings WHERE article_id = $1 ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn average_rating(&self, article_id: Option<Uuid>) -> Result<Option<f64>, RepositoryError> {
        let average: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(value)::float8 FROM ratings WHERE $1::uuid IS NULL OR article_id = $1",
        )
        .bind(article_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(average)
    }
}

#[async_trait]
impl FavoritesRepository for PostgresRepository {
    async fn insert_favorite(&self, favorite: &Favorite) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO favorites (id, actor_id, article_id, created_at) VALUES ($1, $2, $3, $4)")
            .bind(favorite.id)
            .bind(favorite.actor_id)
            .bind(favorite.article_id)
            .bind(favorite.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::unique(e, "favorite"))?;
        Ok(())
    }

    async fn get_favorite(&self, actor_id: ActorId, article_id: Uuid) -> Result<Option<Favorite>, RepositoryError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            "SELECT id, actor_id, article_id, created_at FROM favorites WHERE actor_id = $1 AND article_id = $2",
        )
        .bind(actor_id)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Favorite::from))
    }

    async fn delete_favorite(&self, actor_id: ActorId, article_id: Uuid) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM favorites WHERE actor_id = $1 AND article_id = $2")
            .bind(actor_id)
            .bind(article_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn list_favorite_articles(&self, actor_id: ActorId) -> Result<Vec<Article>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            "SELECT a.id, a.slug, a.title, a.description, a.body, a.author_id, a.created_at, a.updated_at
             FROM favorites f JOIN articles a ON a.id = f.article_id
             WHERE f.actor_id = $1 ORDER BY f.created_at DESC",
        )
            .bind(actor_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn list_favoriters(&self, article_id: Uuid) -> Result<Vec<ActorId>, RepositoryError> {
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT actor_id FROM favorites WHERE article_id = $1")
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}

#[async_trait]
impl BookmarksRepository for PostgresRepository {
    async fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO bookmarks (id, actor_id, article_id, created_at) VALUES ($1, $2, $3, $4)")
            .bind(bookmark.id)
            .bind(bookmark.actor_id)
            .bind(bookmark.article_id)
            .bind(bookmark.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::unique(e, "bookmark"))?;
        Ok(())
    }

    async fn get_bookmark(&self, id: Uuid) -> Result<Option<Bookmark>, RepositoryError> {
        let row = sqlx::query_as::<_, BookmarkRow>(
            "SELECT id, actor_id, article_id, created_at FROM bookmarks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Bookmark::from))
    }

    async fn delete_bookmark(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn list_bookmarks(&self, actor_id: ActorId) -> Result<Vec<Bookmark>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            "SELECT id, actor_id, article_id, created_at FROM bookmarks WHERE actor_id = $1 ORDER BY created_at DESC",
        )
        .bind(actor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Bookmark::from).collect())
    }
}

#[async_trait]
impl HighlightsRepository for PostgresRepository {
    /// Delete-or-insert in one transaction; the unique key on the range
    /// arbitrates between concurrent toggles of the same range.
    async fn toggle_highlight(&self, highlight: &NewHighlight) -> Result<HighlightToggle, RepositoryError> {
        let insert_sql = format!(
            "INSERT INTO highlights (id, actor_id, article_id, start_index, end_index, comment, private, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             ON CONFLICT (actor_id, article_id, start_index, end_index) DO NOTHING
             RETURNING {HIGHLIGHT_COLUMNS}"
        );

        for _ in 0..MAX_TOGGLE_ATTEMPTS {
            let mut tx = self.pool.begin().await?;

            // Blocks while an edit of the article is in flight.
            let version: Option<DateTime<Utc>> =
                sqlx::query_scalar("SELECT updated_at FROM articles WHERE id = $1 FOR SHARE")
                    .bind(highlight.article_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let Some(version) = version else {
                tx.rollback().await?;
                return Err(RepositoryError::TargetNotFound(TargetKind::Article));
            };
            // Stored timestamps carry microseconds only.
            if version.timestamp_micros() != highlight.article_version.timestamp_micros() {
                tx.rollback().await?;
                return Err(RepositoryError::Stale("article"));
            }

            let removed = sqlx::query(
                "DELETE FROM highlights
                 WHERE actor_id = $1 AND article_id = $2 AND start_index = $3 AND end_index = $4",
            )
            .bind(highlight.actor_id)
            .bind(highlight.article_id)
            .bind(highlight.start_index)
            .bind(highlight.end_index)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if removed > 0 {
                tx.commit().await?;
                return Ok(HighlightToggle::Removed);
            }

            let added = sqlx::query_as::<_, HighlightRow>(&insert_sql)
                .bind(Uuid::new_v4())
                .bind(highlight.actor_id)
                .bind(highlight.article_id)
                .bind(highlight.start_index)
                .bind(highlight.end_index)
                .bind(&highlight.comment)
                .bind(highlight.private)
                .bind(Utc::now())
                .fetch_optional(&mut *tx)
                .await?;

            match added {
                Some(row) => {
                    tx.commit().await?;
                    return Ok(HighlightToggle::Added(Highlight::from(row)));
                }
                None => tx.rollback().await?,
            }
        }

        Err(RepositoryError::Contention("highlight"))
    }

    async fn get_highlight(&self, id: Uuid) -> Result<Option<Highlight>, RepositoryError> {
        let sql = format!("SELECT {HIGHLIGHT_COLUMNS} FROM highlights WHERE id = $1");
        let row = sqlx::query_as::<_, HighlightRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Highlight::from))
    }

    async fn update_highlight(&self, highlight: &Highlight) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE highlights SET comment = $2, private = $3, updated_at = $4 WHERE id = $1")
            .bind(highlight.id)
            .bind(&highlight.comment)
            .bind(highlight.private)
            .bind(highlight.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_highlights(
        &self,
        actor_id: ActorId,
        article_id: Option<Uuid>,
    ) -> Result<Vec<Highlight>, RepositoryError> {
        let sql = format!(
            "SELECT {HIGHLIGHT_COLUMNS} FROM highlights
             WHERE actor_id = $1 AND ($2::uuid IS NULL OR article_id = $2)
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, HighlightRow>(&sql)
            .bind(actor_id)
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Highlight::from).collect())
    }

    async fn list_public_highlights(&self, article_id: Uuid) -> Result<Vec<Highlight>, RepositoryError> {
        let sql = format!(
            "SELECT {HIGHLIGHT_COLUMNS} FROM highlights
             WHERE article_id = $1 AND NOT private
             ORDER BY start_index ASC, created_at ASC"
        );
        let rows = sqlx::query_as::<_, HighlightRow>(&sql)
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Highlight::from).collect())
    }
}
