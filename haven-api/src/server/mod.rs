// Server module - HTTP server setup and routing
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::net::SocketAddr;
use tracing::info;

use self::handlers::{analytics, articles, favorites, highlights, ratings, votes};
use self::state::AppState;
use crate::config::create_cors_layer;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(create_cors_layer())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // articles and comments
        .route("/articles", get(articles::list_articles).post(articles::create_article))
        .route(
            "/articles/:slug",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/articles/:slug/comments",
            get(articles::list_comments).post(articles::create_comment),
        )
        .route(
            "/articles/:slug/comments/:id",
            get(articles::get_comment)
                .patch(articles::edit_comment)
                .delete(articles::delete_comment),
        )
        // votes
        .route("/articles/:slug/like", post(votes::like_article))
        .route("/articles/:slug/dislike", post(votes::dislike_article))
        .route("/articles/:slug/comments/:id/like", post(votes::like_comment))
        .route("/articles/:slug/comments/:id/dislike", post(votes::dislike_comment))
        // ratings
        .route(
            "/articles/:slug/ratings",
            get(ratings::list_ratings).post(ratings::create_rating),
        )
        .route(
            "/ratings/:id",
            get(ratings::get_rating)
                .put(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
        // favorites and bookmarks
        .route(
            "/articles/:slug/favorite",
            get(favorites::get_favorite)
                .post(favorites::add_favorite)
                .delete(favorites::remove_favorite),
        )
        .route("/favorites/me", get(favorites::list_favorites))
        .route("/bookmarks", get(favorites::list_bookmarks))
        .route("/bookmarks/:slug", post(favorites::add_bookmark))
        .route("/bookmarks/id/:id", delete(favorites::remove_bookmark))
        // highlights
        .route("/highlights", get(highlights::list_my_highlights))
        .route("/highlights/id/:id", patch(highlights::update_highlight))
        .route(
            "/highlights/:slug",
            get(highlights::list_my_article_highlights).post(highlights::toggle_highlight),
        )
        .route("/highlights/:slug/all", get(highlights::list_public_highlights))
        // analytics and reports
        .route("/analytics", get(analytics::my_reads))
        .route("/analytics/me", get(analytics::reads_of_my_articles))
        .route("/analytics/:slug", patch(analytics::mark_read))
        .route("/reports", get(analytics::list_my_reports))
        .route(
            "/articles/:slug/reports",
            get(analytics::list_article_reports).post(analytics::report_article),
        )
        .route(
            "/reports/:id",
            get(analytics::get_report)
                .put(analytics::update_report)
                .delete(analytics::delete_report),
        )
}

/// Run the server on the specified address
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Server listening on {}", addr);
    info!("- API: http://{}/api", addr);
    info!("- Health endpoint: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
