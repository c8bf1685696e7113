//! In-process implementation of the haven repository.
//!
//! Every table lives behind one `tokio::sync::Mutex`, so each trait method is
//! a single critical section and check-then-act operations are atomic. Used by
//! tests and by `HAVEN_STORAGE=memory` deployments.
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use haven_shared::types::{
    Actor, ActorId, Article, ArticleReport, Bookmark, Comment, Favorite, Highlight,
    HighlightToggle, NewHighlight, Rating, ReadsReport, Target, TargetKind, Vote, VoteTransition,
    VoteValue, VotesCount,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::interfaces::{
    ActorsRepository, AnalyticsRepository, ArticlesRepository, BookmarksRepository,
    FavoritesRepository, HighlightsRepository, RatingsRepository, ReportsRepository,
    VotesRepository,
};

#[derive(Default)]
struct Tables {
    actors: HashMap<ActorId, Actor>,
    articles: HashMap<Uuid, Article>,
    comments: HashMap<Uuid, Comment>,
    votes: HashMap<(ActorId, Target), Vote>,
    ratings: HashMap<Uuid, Rating>,
    favorites: HashMap<(ActorId, Uuid), Favorite>,
    bookmarks: HashMap<Uuid, Bookmark>,
    highlights: HashMap<Uuid, Highlight>,
    reads: HashMap<Uuid, ReadsReport>,
    reports: HashMap<Uuid, ArticleReport>,
}

impl Tables {
    /// A comment and every reply below it.
    fn comment_subtree(&self, root: Uuid) -> HashSet<Uuid> {
        let mut subtree = HashSet::from([root]);
        loop {
            let before = subtree.len();
            for comment in self.comments.values() {
                if comment.parent_id.is_some_and(|parent| subtree.contains(&parent)) {
                    subtree.insert(comment.id);
                }
            }
            if subtree.len() == before {
                return subtree;
            }
        }
    }

    fn drop_comments(&mut self, doomed: &HashSet<Uuid>) {
        self.comments.retain(|id, _| !doomed.contains(id));
        self.votes
            .retain(|(_, target), _| !matches!(target, Target::Comment(id) if doomed.contains(id)));
    }
}

/// Newest first.
fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) {
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

/// In-memory repository; cheap to construct, state is dropped with the value.
#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActorsRepository for MemoryRepository {
    async fn insert_actor(&self, actor: &Actor) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        let taken = tables
            .actors
            .values()
            .any(|a| a.id == actor.id || a.username == actor.username || a.email == actor.email);
        if taken {
            return Err(RepositoryError::Conflict("actor"));
        }
        tables.actors.insert(actor.id, actor.clone());
        Ok(())
    }

    async fn get_actor(&self, id: ActorId) -> Result<Option<Actor>, RepositoryError> {
        Ok(self.tables.lock().await.actors.get(&id).cloned())
    }
}

#[async_trait]
impl ArticlesRepository for MemoryRepository {
    async fn insert_article(&self, article: &Article) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.articles.values().any(|a| a.slug == article.slug) {
            return Err(RepositoryError::Conflict("slug"));
        }
        tables.articles.insert(article.id, article.clone());
        Ok(())
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, RepositoryError> {
        Ok(self.tables.lock().await.articles.get(&id).cloned())
    }

    async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.articles.values().find(|a| a.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.articles.values().any(|a| a.slug == slug))
    }

    async fn update_article(&self, article: &Article, purge_highlights: bool) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let taken = tables
            .articles
            .values()
            .any(|a| a.slug == article.slug && a.id != article.id);
        if taken {
            return Err(RepositoryError::Conflict("slug"));
        }
        let Some(stored) = tables.articles.get_mut(&article.id) else {
            return Ok(0);
        };
        stored.slug = article.slug.clone();
        stored.title = article.title.clone();
        stored.description = article.description.clone();
        stored.body = article.body.clone();
        stored.updated_at = article.updated_at;

        if !purge_highlights {
            return Ok(0);
        }
        let before = tables.highlights.len();
        tables.highlights.retain(|_, h| h.article_id != article.id);
        Ok((before - tables.highlights.len()) as u64)
    }

    async fn delete_article(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.articles.remove(&id).is_none() {
            return Ok(false);
        }

        let comments: HashSet<Uuid> = tables
            .comments
            .values()
            .filter(|c| c.article_id == id)
            .map(|c| c.id)
            .collect();
        tables.drop_comments(&comments);
        tables.votes.retain(|(_, target), _| *target != Target::Article(id));
        tables.ratings.retain(|_, r| r.article_id != id);
        tables.favorites.retain(|(_, article_id), _| *article_id != id);
        tables.bookmarks.retain(|_, b| b.article_id != id);
        tables.highlights.retain(|_, h| h.article_id != id);
        tables.reads.retain(|_, r| r.article_id != id);
        tables.reports.retain(|_, r| r.article_id != id);
        Ok(true)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, RepositoryError> {
        let mut articles: Vec<Article> = self.tables.lock().await.articles.values().cloned().collect();
        newest_first(&mut articles, |a| a.created_at);
        Ok(articles)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.tables.lock().await.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError> {
        Ok(self.tables.lock().await.comments.get(&id).cloned())
    }

    async fn update_comment(&self, comment: &Comment) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(stored) = tables.comments.get_mut(&comment.id) {
            stored.body = comment.body.clone();
            stored.updated_at = comment.updated_at;
        }
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.comments.contains_key(&id) {
            return Ok(false);
        }
        let subtree = tables.comment_subtree(id);
        tables.drop_comments(&subtree);
        Ok(true)
    }

    async fn list_comments(
        &self,
        article_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<Comment>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.article_id == article_id && c.parent_id == parent_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }
}

#[async_trait]
impl VotesRepository for MemoryRepository {
    async fn apply_vote(
        &self,
        actor_id: ActorId,
        target: Target,
        value: VoteValue,
    ) -> Result<VoteTransition, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let exists = match target {
            Target::Article(id) => tables.articles.contains_key(&id),
            Target::Comment(id) => tables.comments.contains_key(&id),
        };
        if !exists {
            return Err(RepositoryError::TargetNotFound(target.kind()));
        }

        let key = (actor_id, target);
        let existing = tables.votes.get(&key).map(|vote| vote.value);

        let transition = VoteTransition::resolve(existing, value);
        match transition {
            VoteTransition::Removed => {
                tables.votes.remove(&key);
            }
            VoteTransition::Created | VoteTransition::Switched => {
                tables.votes.insert(key, Vote { actor_id, target, value, voted_at: Utc::now() });
            }
        }
        Ok(transition)
    }

    async fn get_vote(&self, actor_id: ActorId, target: Target) -> Result<Option<Vote>, RepositoryError> {
        Ok(self.tables.lock().await.votes.get(&(actor_id, target)).cloned())
    }

    async fn count_votes(&self, target: Target) -> Result<VotesCount, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut count = VotesCount::default();
        for vote in tables.votes.values().filter(|vote| vote.target == target) {
            match vote.value {
                VoteValue::Like => count.like_count += 1,
                VoteValue::Dislike => count.dislike_count += 1,
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl RatingsRepository for MemoryRepository {
    async fn insert_rating(&self, rating: &Rating) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        let duplicate = tables
            .ratings
            .values()
            .any(|r| r.author_id == rating.author_id && r.article_id == rating.article_id);
        if duplicate {
            return Err(RepositoryError::Conflict("rating"));
        }
        tables.ratings.insert(rating.id, rating.clone());
        Ok(())
    }

    async fn get_rating(&self, id: Uuid) -> Result<Option<Rating>, RepositoryError> {
        Ok(self.tables.lock().await.ratings.get(&id).cloned())
    }

    async fn update_rating(&self, rating: &Rating) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(stored) = tables.ratings.get_mut(&rating.id) {
            stored.value = rating.value;
            stored.review = rating.review.clone();
            stored.updated_at = rating.updated_at;
        }
        Ok(())
    }

    async fn delete_rating(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.tables.lock().await.ratings.remove(&id).is_some())
    }

    async fn list_ratings(&self, article_id: Uuid) -> Result<Vec<Rating>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut ratings: Vec<Rating> = tables
            .ratings
            .values()
            .filter(|r| r.article_id == article_id)
            .cloned()
            .collect();
        newest_first(&mut ratings, |r| r.created_at);
        Ok(ratings)
    }

    async fn average_rating(&self, article_id: Option<Uuid>) -> Result<Option<f64>, RepositoryError> {
        let tables = self.tables.lock().await;
        let values: Vec<f64> = tables
            .ratings
            .values()
            .filter(|r| article_id.is_none_or(|id| r.article_id == id))
            .map(|r| f64::from(r.value))
            .collect();
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }
}

#[async_trait]
impl FavoritesRepository for MemoryRepository {
    async fn insert_favorite(&self, favorite: &Favorite) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        let key = (favorite.actor_id, favorite.article_id);
        if tables.favorites.contains_key(&key) {
            return Err(RepositoryError::Conflict("favorite"));
        }
        tables.favorites.insert(key, favorite.clone());
        Ok(())
    }

    async fn get_favorite(&self, actor_id: ActorId, article_id: Uuid) -> Result<Option<Favorite>, RepositoryError> {
        Ok(self.tables.lock().await.favorites.get(&(actor_id, article_id)).cloned())
    }

    async fn delete_favorite(&self, actor_id: ActorId, article_id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.tables.lock().await.favorites.remove(&(actor_id, article_id)).is_some())
    }

    async fn list_favorite_articles(&self, actor_id: ActorId) -> Result<Vec<Article>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut favorites: Vec<&Favorite> = tables
            .favorites
            .values()
            .filter(|f| f.actor_id == actor_id)
            .collect();
        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(favorites
            .into_iter()
            .filter_map(|f| tables.articles.get(&f.article_id).cloned())
            .collect())
    }

    async fn list_favoriters(&self, article_id: Uuid) -> Result<Vec<ActorId>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .favorites
            .keys()
            .filter(|(_, article)| *article == article_id)
            .map(|(actor, _)| *actor)
            .collect())
    }
}

#[async_trait]
impl BookmarksRepository for MemoryRepository {
    async fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        let duplicate = tables
            .bookmarks
            .values()
            .any(|b| b.actor_id == bookmark.actor_id && b.article_id == bookmark.article_id);
        if duplicate {
            return Err(RepositoryError::Conflict("bookmark"));
        }
        tables.bookmarks.insert(bookmark.id, bookmark.clone());
        Ok(())
    }

    async fn get_bookmark(&self, id: Uuid) -> Result<Option<Bookmark>, RepositoryError> {
        Ok(self.tables.lock().await.bookmarks.get(&id).cloned())
    }

    async fn delete_bookmark(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.tables.lock().await.bookmarks.remove(&id).is_some())
    }

    async fn list_bookmarks(&self, actor_id: ActorId) -> Result<Vec<Bookmark>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut bookmarks: Vec<Bookmark> = tables
            .bookmarks
            .values()
            .filter(|b| b.actor_id == actor_id)
            .cloned()
            .collect();
        newest_first(&mut bookmarks, |b| b.created_at);
        Ok(bookmarks)
    }
}

#[async_trait]
impl HighlightsRepository for MemoryRepository {
    async fn toggle_highlight(&self, highlight: &NewHighlight) -> Result<HighlightToggle, RepositoryError> {
        let mut tables = self.tables.lock().await;
        match tables.articles.get(&highlight.article_id) {
            None => return Err(RepositoryError::TargetNotFound(TargetKind::Article)),
            Some(article) if article.updated_at != highlight.article_version => {
                return Err(RepositoryError::Stale("article"));
            }
            Some(_) => {}
        }

        let existing = tables
            .highlights
            .values()
            .find(|h| {
                h.actor_id == highlight.actor_id
                    && h.article_id == highlight.article_id
                    && h.start_index == highlight.start_index
                    && h.end_index == highlight.end_index
            })
            .map(|h| h.id);

        if let Some(id) = existing {
            tables.highlights.remove(&id);
            return Ok(HighlightToggle::Removed);
        }

        let now = Utc::now();
        let stored = Highlight {
            id: Uuid::new_v4(),
            actor_id: highlight.actor_id,
            article_id: highlight.article_id,
            start_index: highlight.start_index,
            end_index: highlight.end_index,
            comment: highlight.comment.clone(),
            private: highlight.private,
            created_at: now,
            updated_at: now,
        };
        tables.highlights.insert(stored.id, stored.clone());
        Ok(HighlightToggle::Added(stored))
    }

    async fn get_highlight(&self, id: Uuid) -> Result<Option<Highlight>, RepositoryError> {
        Ok(self.tables.lock().await.highlights.get(&id).cloned())
    }

    async fn update_highlight(&self, highlight: &Highlight) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(stored) = tables.highlights.get_mut(&highlight.id) {
            stored.comment = highlight.comment.clone();
            stored.private = highlight.private;
            stored.updated_at = highlight.updated_at;
        }
        Ok(())
    }

    async fn list_highlights(
        &self,
        actor_id: ActorId,
        article_id: Option<Uuid>,
    ) -> Result<Vec<Highlight>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut highlights: Vec<Highlight> = tables
            .highlights
            .values()
            .filter(|h| h.actor_id == actor_id && article_id.is_none_or(|id| h.article_id == id))
            .cloned()
            .collect();
        highlights.sort_by_key(|h| h.created_at);
        Ok(highlights)
    }

    async fn list_public_highlights(&self, article_id: Uuid) -> Result<Vec<Highlight>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut highlights: Vec<Highlight> = tables
            .highlights
            .values()
            .filter(|h| h.article_id == article_id && !h.private)
            .cloned()
            .collect();
        highlights.sort_by_key(|h| (h.start_index, h.created_at));
        Ok(highlights)
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryRepository {
    async fn record_read(
        &self,
        article_id: Uuid,
        actor_id: Option<ActorId>,
    ) -> Result<ReadsReport, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if actor_id.is_some() {
            let existing = tables
                .reads
                .values()
                .find(|r| r.actor_id == actor_id && r.article_id == article_id);
            if let Some(existing) = existing {
                return Ok(existing.clone());
            }
        }

        let now = Utc::now();
        let read = ReadsReport {
            id: Uuid::new_v4(),
            article_id,
            actor_id,
            full_read: false,
            created_at: now,
            updated_at: now,
        };
        tables.reads.insert(read.id, read.clone());
        Ok(read)
    }

    async fn get_read(&self, actor_id: ActorId, article_id: Uuid) -> Result<Option<ReadsReport>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reads
            .values()
            .find(|r| r.actor_id == Some(actor_id) && r.article_id == article_id)
            .cloned())
    }

    async fn mark_full_read(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(read) = tables.reads.get_mut(&id) {
            read.full_read = true;
            read.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn count_reads(&self, article_id: Uuid) -> Result<i64, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.reads.values().filter(|r| r.article_id == article_id).count() as i64)
    }

    async fn list_reads_by_reader(&self, actor_id: ActorId) -> Result<Vec<ReadsReport>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut reads: Vec<ReadsReport> = tables
            .reads
            .values()
            .filter(|r| r.actor_id == Some(actor_id))
            .cloned()
            .collect();
        newest_first(&mut reads, |r| r.created_at);
        Ok(reads)
    }

    async fn list_reads_for_author(&self, author_id: ActorId) -> Result<Vec<ReadsReport>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut reads: Vec<ReadsReport> = tables
            .reads
            .values()
            .filter(|r| {
                tables
                    .articles
                    .get(&r.article_id)
                    .is_some_and(|a| a.author_id == author_id)
            })
            .cloned()
            .collect();
        newest_first(&mut reads, |r| r.created_at);
        Ok(reads)
    }
}

#[async_trait]
impl ReportsRepository for MemoryRepository {
    async fn insert_report(&self, report: &ArticleReport) -> Result<(), RepositoryError> {
        self.tables.lock().await.reports.insert(report.id, report.clone());
        Ok(())
    }

    async fn get_report(&self, id: Uuid) -> Result<Option<ArticleReport>, RepositoryError> {
        Ok(self.tables.lock().await.reports.get(&id).cloned())
    }

    async fn update_report(&self, report: &ArticleReport) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(stored) = tables.reports.get_mut(&report.id) {
            stored.reason = report.reason.clone();
            stored.updated_at = report.updated_at;
        }
        Ok(())
    }

    async fn delete_report(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.tables.lock().await.reports.remove(&id).is_some())
    }

    async fn list_reports_by_reporter(&self, reporter_id: ActorId) -> Result<Vec<ArticleReport>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut reports: Vec<ArticleReport> = tables
            .reports
            .values()
            .filter(|r| r.reporter_id == reporter_id)
            .cloned()
            .collect();
        newest_first(&mut reports, |r| r.created_at);
        Ok(reports)
    }

    async fn list_reports_for_article(&self, article_id: Uuid) -> Result<Vec<ArticleReport>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut reports: Vec<ArticleReport> = tables
            .reports
            .values()
            .filter(|r| r.article_id == article_id)
            .cloned()
            .collect();
        newest_first(&mut reports, |r| r.created_at);
        Ok(reports)
    }
}
