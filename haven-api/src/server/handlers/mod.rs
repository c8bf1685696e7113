// HTTP request handlers
pub mod analytics;
pub mod articles;
pub mod favorites;
pub mod highlights;
pub mod ratings;
pub mod votes;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Haven API is running")
}

/// Body returned by deletions that have nothing else to report.
fn success() -> Json<Value> {
    Json(json!({ "message": "success" }))
}
