//! Favorites and bookmarks: one per actor and article, duplicates rejected.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use haven_shared::types::FavoriteView;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::RequireActor;
use crate::errors::ApiError;
use crate::server::extract::ApiPath;
use crate::server::state::AppState;

const BOOKMARK_ADDED: &str = "Article has been added to your bookmarks.";
const BOOKMARK_REMOVED: &str = "The bookmark has been removed.";
const BOOKMARKS_FOUND: &str = "Here are your bookmarks.";
const NO_BOOKMARKS: &str = "You have no bookmarked articles.";

pub async fn add_favorite(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<(StatusCode, Json<FavoriteView>), ApiError> {
    let favorite = state.ledger.add_favorite(&actor, &slug).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let message = state.ledger.remove_favorite(&actor, &slug).await?;
    Ok(Json(json!({ "message": message })))
}

pub async fn get_favorite(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let article = state.ledger.get_favorite(&actor, &slug).await?;
    Ok(Json(json!({ "message": "article favorited", "article": article })))
}

pub async fn list_favorites(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<Json<Value>, ApiError> {
    let articles = state.ledger.list_favorites(&actor).await?;
    Ok(Json(json!({ "articles": articles })))
}

pub async fn list_bookmarks(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<Json<Value>, ApiError> {
    let bookmarks = state.ledger.list_bookmarks(&actor).await?;
    let message = if bookmarks.is_empty() { NO_BOOKMARKS } else { BOOKMARKS_FOUND };
    Ok(Json(json!({ "message": message, "bookmarks": bookmarks })))
}

pub async fn add_bookmark(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let bookmark = state.ledger.add_bookmark(&actor, &slug).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": BOOKMARK_ADDED, "bookmark": bookmark })),
    ))
}

pub async fn remove_bookmark(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.ledger.remove_bookmark(&actor, id).await?;
    Ok(Json(json!({ "message": BOOKMARK_REMOVED })))
}
