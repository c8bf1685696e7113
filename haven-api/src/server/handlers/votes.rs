//! Like and dislike toggles. Each call answers with the target's fresh counts.
use axum::{Json, extract::State};
use haven_ledger::TargetRef;
use haven_shared::types::{Actor, VoteValue, VotesCount};
use uuid::Uuid;

use crate::auth::RequireActor;
use crate::errors::ApiError;
use crate::server::extract::ApiPath;
use crate::server::state::AppState;

async fn vote(
    state: &AppState,
    actor: &Actor,
    target: TargetRef,
    value: VoteValue,
) -> Result<Json<VotesCount>, ApiError> {
    let counts = state.ledger.submit_vote(actor, &target, value).await?;
    Ok(Json(counts))
}

pub async fn like_article(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<VotesCount>, ApiError> {
    vote(&state, &actor, TargetRef::Article { slug }, VoteValue::Like).await
}

pub async fn dislike_article(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<VotesCount>, ApiError> {
    vote(&state, &actor, TargetRef::Article { slug }, VoteValue::Dislike).await
}

pub async fn like_comment(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath((slug, comment_id)): ApiPath<(String, Uuid)>,
) -> Result<Json<VotesCount>, ApiError> {
    vote(&state, &actor, TargetRef::Comment { slug, comment_id }, VoteValue::Like).await
}

pub async fn dislike_comment(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath((slug, comment_id)): ApiPath<(String, Uuid)>,
) -> Result<Json<VotesCount>, ApiError> {
    vote(&state, &actor, TargetRef::Comment { slug, comment_id }, VoteValue::Dislike).await
}
