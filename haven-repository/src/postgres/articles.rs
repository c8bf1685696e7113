//! Actors, articles and comment threads on PostgreSQL.
use async_trait::async_trait;
use haven_shared::types::{Actor, ActorId, Article, Comment, TargetKind};
use uuid::Uuid;

use super::PostgresRepository;
use super::rows::{ARTICLE_COLUMNS, ActorRow, ArticleRow, COMMENT_COLUMNS, CommentRow};
use crate::errors::RepositoryError;
use crate::interfaces::{ActorsRepository, ArticlesRepository};

/// Ids of a comment and all of its replies, transitively.
const COMMENT_SUBTREE: &str = "WITH RECURSIVE subtree AS (
        SELECT id FROM comments WHERE id = $1
        UNION ALL
        SELECT c.id FROM comments c JOIN subtree s ON c.parent_id = s.id
    )";

#[async_trait]
impl ActorsRepository for PostgresRepository {
    async fn insert_actor(&self, actor: &Actor) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO actors (id, username, email, bio, image, is_verified) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(actor.id)
        .bind(&actor.username)
        .bind(&actor.email)
        .bind(&actor.bio)
        .bind(&actor.image)
        .bind(actor.is_verified)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unique(e, "actor"))?;
        Ok(())
    }

    async fn get_actor(&self, id: ActorId) -> Result<Option<Actor>, RepositoryError> {
        let row = sqlx::query_as::<_, ActorRow>(
            "SELECT id, username, email, bio, image, is_verified FROM actors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Actor::from))
    }
}

#[async_trait]
impl ArticlesRepository for PostgresRepository {
    async fn insert_article(&self, article: &Article) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO articles (id, slug, title, description, body, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(article.id)
        .bind(&article.slug)
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.body)
        .bind(article.author_id)
        .bind(article.created_at)
        .bind(article.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unique(e, "slug"))?;
        Ok(())
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Article::from))
    }

    async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Article::from))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM articles WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// The update row-locks the article, so a highlight toggle waiting on its
    /// share lock sees the new `updated_at` and is refused as stale.
    async fn update_article(&self, article: &Article, purge_highlights: bool) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE articles SET slug = $2, title = $3, description = $4, body = $5, updated_at = $6 WHERE id = $1",
        )
        .bind(article.id)
        .bind(&article.slug)
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.body)
        .bind(article.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::unique(e, "slug"))?;

        let purged = if purge_highlights {
            sqlx::query("DELETE FROM highlights WHERE article_id = $1")
                .bind(article.id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
        } else {
            0
        };

        tx.commit().await?;
        Ok(purged)
    }

    async fn delete_article(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Waits out votes that hold a key-share lock on the article or one of
        // its comments, so the vote delete below sees them committed.
        sqlx::query("SELECT 1 FROM articles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("SELECT 1 FROM comments WHERE article_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM votes
             WHERE (target_kind = $2 AND target_id = $1)
                OR (target_kind = $3 AND target_id IN (SELECT id FROM comments WHERE article_id = $1))",
        )
        .bind(id)
        .bind(TargetKind::Article.as_i16())
        .bind(TargetKind::Comment.as_i16())
        .execute(&mut *tx)
        .await?;

        // Remaining interactions go through ON DELETE CASCADE.
        let deleted = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, RepositoryError> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO comments (id, article_id, author_id, body, parent_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(comment.id)
        .bind(comment.article_id)
        .bind(comment.author_id)
        .bind(&comment.body)
        .bind(comment.parent_id)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Comment::from))
    }

    async fn update_comment(&self, comment: &Comment) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE comments SET body = $2, updated_at = $3 WHERE id = $1")
            .bind(comment.id)
            .bind(&comment.body)
            .bind(comment.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let lock_sql = format!(
            "{COMMENT_SUBTREE} SELECT 1 FROM comments WHERE id IN (SELECT id FROM subtree) FOR UPDATE"
        );
        sqlx::query(&lock_sql).bind(id).execute(&mut *tx).await?;

        let votes_sql = format!(
            "{COMMENT_SUBTREE} DELETE FROM votes WHERE target_kind = $2 AND target_id IN (SELECT id FROM subtree)"
        );
        sqlx::query(&votes_sql)
            .bind(id)
            .bind(TargetKind::Comment.as_i16())
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn list_comments(
        &self,
        article_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<Comment>, RepositoryError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE article_id = $1 AND parent_id IS NOT DISTINCT FROM $2
             ORDER BY created_at ASC"
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(article_id)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }
}
