//! Repository interfaces for the haven data store.
//!
//! Every aggregate gets its own trait so the ledger can depend on exactly the
//! storage surface it uses; [`HavenRepository`] bundles them for wiring.
mod actors;
mod analytics;
mod articles;
mod bookmarks;
mod favorites;
mod highlights;
mod ratings;
mod reports;
mod votes;

pub use actors::ActorsRepository;
pub use analytics::AnalyticsRepository;
pub use articles::ArticlesRepository;
pub use bookmarks::BookmarksRepository;
pub use favorites::FavoritesRepository;
pub use highlights::HighlightsRepository;
pub use ratings::RatingsRepository;
pub use reports::ReportsRepository;
pub use votes::VotesRepository;

/// Every storage capability the interaction ledger needs.
///
/// Implemented automatically for any type implementing all aggregate traits.
pub trait HavenRepository:
    ActorsRepository
    + ArticlesRepository
    + VotesRepository
    + RatingsRepository
    + FavoritesRepository
    + BookmarksRepository
    + HighlightsRepository
    + AnalyticsRepository
    + ReportsRepository
{
}

impl<T> HavenRepository for T where
    T: ActorsRepository
        + ArticlesRepository
        + VotesRepository
        + RatingsRepository
        + FavoritesRepository
        + BookmarksRepository
        + HighlightsRepository
        + AnalyticsRepository
        + ReportsRepository
{
}
