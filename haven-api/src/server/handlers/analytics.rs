//! Read statistics and article abuse reports.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use haven_shared::types::ReadsReportView;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::success;
use crate::auth::RequireActor;
use crate::errors::ApiError;
use crate::server::extract::{ApiJson, ApiPath};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReadUpdate {
    pub full_read: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub report: ReportBody,
}

#[derive(Debug, Deserialize)]
pub struct ReportBody {
    #[serde(default)]
    pub reason: String,
}

fn views(reads: Vec<ReadsReportView>) -> Json<Value> {
    let count = reads.len();
    Json(json!({ "views": reads, "viewsCount": count }))
}

/// Articles the caller has read.
pub async fn my_reads(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<Json<Value>, ApiError> {
    Ok(views(state.ledger.my_reads(&actor).await?))
}

/// Reads recorded on the caller's own articles.
pub async fn reads_of_my_articles(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<Json<Value>, ApiError> {
    Ok(views(state.ledger.reads_of_my_articles(&actor).await?))
}

pub async fn mark_read(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
    ApiJson(update): ApiJson<ReadUpdate>,
) -> Result<Json<ReadsReportView>, ApiError> {
    let full_read = update
        .full_read
        .ok_or_else(|| ApiError::BadRequest("full_read is required.".to_string()))?;
    let read = state.ledger.mark_read(&actor, &slug, full_read).await?;
    Ok(Json(read))
}

pub async fn list_my_reports(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
) -> Result<Json<Value>, ApiError> {
    let reports = state.ledger.list_my_reports(&actor).await?;
    Ok(Json(json!({ "reports": reports })))
}

pub async fn list_article_reports(
    State(state): State<AppState>,
    RequireActor(_actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let reports = state.ledger.list_article_reports(&slug).await?;
    Ok(Json(json!({ "reports": reports })))
}

pub async fn report_article(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<ReportRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let report = state
        .ledger
        .report_article(&actor, &slug, request.report.reason)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "report": report }))))
}

pub async fn get_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let report = state.ledger.get_report(&actor, id).await?;
    Ok(Json(json!({ "report": report })))
}

pub async fn update_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<ReportRequest>,
) -> Result<Json<Value>, ApiError> {
    let report = state
        .ledger
        .update_report(&actor, id, request.report.reason)
        .await?;
    Ok(Json(json!({ "report": report })))
}

pub async fn delete_report(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.ledger.delete_report(&actor, id).await?;
    Ok(success())
}
