//! Row types decoded by `sqlx` and their conversions into shared types.
use chrono::{DateTime, Utc};
use haven_shared::types::{
    Actor, Article, ArticleReport, Bookmark, Comment, Favorite, Highlight, Rating, ReadsReport,
    Target, TargetKind, Vote, VoteValue,
};
use uuid::Uuid;

use crate::errors::RepositoryError;

pub(super) const ARTICLE_COLUMNS: &str =
    "id, slug, title, description, body, author_id, created_at, updated_at";
pub(super) const COMMENT_COLUMNS: &str =
    "id, article_id, author_id, body, parent_id, created_at, updated_at";
pub(super) const RATING_COLUMNS: &str =
    "id, author_id, article_id, value, review, created_at, updated_at";
pub(super) const HIGHLIGHT_COLUMNS: &str =
    "id, actor_id, article_id, start_index, end_index, comment, private, created_at, updated_at";
pub(super) const READ_COLUMNS: &str = "id, article_id, actor_id, full_read, created_at, updated_at";
pub(super) const REPORT_COLUMNS: &str = "id, reporter_id, article_id, reason, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(super) struct ActorRow {
    id: Uuid,
    username: String,
    email: String,
    bio: String,
    image: Option<String>,
    is_verified: bool,
}

impl From<ActorRow> for Actor {
    fn from(row: ActorRow) -> Self {
        Actor {
            id: row.id,
            username: row.username,
            email: row.email,
            bio: row.bio,
            image: row.image,
            is_verified: row.is_verified,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ArticleRow {
    id: Uuid,
    slug: String,
    title: String,
    description: String,
    body: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            body: row.body,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct CommentRow {
    id: Uuid,
    article_id: Uuid,
    author_id: Uuid,
    body: String,
    parent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            article_id: row.article_id,
            author_id: row.author_id,
            body: row.body,
            parent_id: row.parent_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct VoteRow {
    actor_id: Uuid,
    target_kind: i16,
    target_id: Uuid,
    value: i16,
    voted_at: DateTime<Utc>,
}

impl TryFrom<VoteRow> for Vote {
    type Error = RepositoryError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        let kind = TargetKind::from_i16(row.target_kind)
            .ok_or(RepositoryError::InvalidTargetKind(row.target_kind))?;
        let value = VoteValue::try_from(row.value).map_err(RepositoryError::InvalidVoteValue)?;
        Ok(Vote {
            actor_id: row.actor_id,
            target: Target::from_parts(kind, row.target_id),
            value,
            voted_at: row.voted_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct RatingRow {
    id: Uuid,
    author_id: Uuid,
    article_id: Uuid,
    value: i16,
    review: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating {
            id: row.id,
            author_id: row.author_id,
            article_id: row.article_id,
            value: row.value,
            review: row.review,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct FavoriteRow {
    id: Uuid,
    actor_id: Uuid,
    article_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Favorite {
            id: row.id,
            actor_id: row.actor_id,
            article_id: row.article_id,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct BookmarkRow {
    id: Uuid,
    actor_id: Uuid,
    article_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<BookmarkRow> for Bookmark {
    fn from(row: BookmarkRow) -> Self {
        Bookmark {
            id: row.id,
            actor_id: row.actor_id,
            article_id: row.article_id,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct HighlightRow {
    id: Uuid,
    actor_id: Uuid,
    article_id: Uuid,
    start_index: i32,
    end_index: i32,
    comment: String,
    private: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HighlightRow> for Highlight {
    fn from(row: HighlightRow) -> Self {
        Highlight {
            id: row.id,
            actor_id: row.actor_id,
            article_id: row.article_id,
            start_index: row.start_index,
            end_index: row.end_index,
            comment: row.comment,
            private: row.private,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ReadRow {
    id: Uuid,
    article_id: Uuid,
    actor_id: Option<Uuid>,
    full_read: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReadRow> for ReadsReport {
    fn from(row: ReadRow) -> Self {
        ReadsReport {
            id: row.id,
            article_id: row.article_id,
            actor_id: row.actor_id,
            full_read: row.full_read,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ReportRow {
    id: Uuid,
    reporter_id: Uuid,
    article_id: Uuid,
    reason: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReportRow> for ArticleReport {
    fn from(row: ReportRow) -> Self {
        ArticleReport {
            id: row.id,
            reporter_id: row.reporter_id,
            article_id: row.article_id,
            reason: row.reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
