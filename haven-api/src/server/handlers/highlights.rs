//! Highlights of article passages. Submitting the same range twice removes it.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use haven_ledger::{HighlightOutcome, HighlightRequest};
use haven_shared::types::{HighlightChanges, HighlightView};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::RequireActor;
use crate::errors::ApiError;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

const HIGHLIGHTS_FOUND: &str = "Here are your highlights.";
const NO_HIGHLIGHTS: &str = "You have no highlights on this article.";
const HIGHLIGHT_UPDATED: &str = "Highlight has been updated.";

#[derive(Debug, Deserialize)]
pub struct HighlightData<T> {
    pub highlight_data: T,
}

fn found(highlights: Vec<HighlightView>, empty: &str) -> Json<Value> {
    let message = if highlights.is_empty() { empty } else { HIGHLIGHTS_FOUND };
    let count = highlights.len();
    Json(json!({ "message": message, "highlights": highlights, "count": count }))
}

pub async fn list_my_highlights(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<Json<Value>, ApiError> {
    let highlights = state.ledger.list_my_highlights(&actor, None).await?;
    Ok(found(highlights, "You have no highlights."))
}

pub async fn list_my_article_highlights(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let highlights = state.ledger.list_my_highlights(&actor, Some(slug.as_str())).await?;
    Ok(found(highlights, NO_HIGHLIGHTS))
}

pub async fn list_public_highlights(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let highlights = state.ledger.list_public_highlights(&slug).await?;
    Ok(found(highlights, "There are no public highlights on this article."))
}

/// Adds the highlight (201) or, when the same range is already highlighted,
/// removes it (200).
pub async fn toggle_highlight(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<HighlightData<HighlightRequest>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let outcome = state
        .ledger
        .toggle_highlight(&actor, &slug, request.highlight_data)
        .await?;
    let message = outcome.message();
    Ok(match outcome {
        HighlightOutcome::Added(highlight) => (
            StatusCode::CREATED,
            Json(json!({ "message": message, "highlight": highlight })),
        ),
        HighlightOutcome::Removed => (StatusCode::OK, Json(json!({ "message": message }))),
    })
}

pub async fn update_highlight(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<HighlightData<HighlightChanges>>,
) -> Result<Json<Value>, ApiError> {
    let highlight = state
        .ledger
        .update_highlight(&actor, id, request.highlight_data)
        .await?;
    Ok(Json(json!({ "message": HIGHLIGHT_UPDATED, "highlight": highlight })))
}
