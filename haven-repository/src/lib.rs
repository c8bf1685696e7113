//! # Haven Repository
//! This crate provides traits and implementations for persisting everything the
//! interaction ledger keeps: actors, articles, comments, votes, ratings,
//! favorites, bookmarks, highlights, read statistics and abuse reports.
//! It includes definitions for errors, interfaces, and concrete implementations
//! for PostgreSQL and for an in-process store.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{
    ActorsRepository, AnalyticsRepository, ArticlesRepository, BookmarksRepository,
    FavoritesRepository, HavenRepository, HighlightsRepository, RatingsRepository,
    ReportsRepository, VotesRepository,
};
pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;
