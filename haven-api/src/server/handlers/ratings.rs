use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use haven_ledger::RatingChanges;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::success;
use crate::auth::RequireActor;
use crate::errors::ApiError;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RatingRequest<T> {
    pub rating: T,
}

#[derive(Debug, Deserialize)]
pub struct NewRating {
    pub value: i64,
    #[serde(default)]
    pub review: String,
}

pub async fn list_ratings(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let ratings = state.ledger.list_ratings(&slug).await?;
    Ok(Json(json!({ "ratings": ratings })))
}

pub async fn create_rating(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<RatingRequest<NewRating>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let NewRating { value, review } = request.rating;
    let rating = state.ledger.submit_rating(&actor, &slug, value, review).await?;
    Ok((StatusCode::CREATED, Json(json!({ "rating": rating }))))
}

pub async fn get_rating(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let rating = state.ledger.get_rating(id).await?;
    Ok(Json(json!({ "rating": rating })))
}

pub async fn update_rating(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<RatingRequest<RatingChanges>>,
) -> Result<Json<Value>, ApiError> {
    let rating = state.ledger.update_rating(&actor, id, request.rating).await?;
    Ok(Json(json!({ "rating": rating })))
}

pub async fn delete_rating(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.ledger.delete_rating(&actor, id).await?;
    Ok(success())
}
