//! Articles and their comment threads: the targets everything else hangs off.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use haven_shared::types::{ArticleChanges, NewArticle, NewComment};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::success;
use crate::auth::{MaybeActor, RequireActor};
use crate::errors::ApiError;
use crate::server::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ArticleRequest<T> {
    pub article: T,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest<T> {
    pub comment: T,
}

#[derive(Debug, Deserialize)]
pub struct CommentEdit {
    pub body: String,
}

/// `?parent=<id>` lists the replies to one comment instead of the top level.
#[derive(Debug, Default, Deserialize)]
pub struct CommentsQuery {
    pub parent: Option<Uuid>,
}

pub async fn list_articles(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let articles = state.ledger.list_articles().await?;
    let count = articles.len();
    Ok(Json(json!({ "articles": articles, "articlesCount": count })))
}

pub async fn create_article(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiJson(request): ApiJson<ArticleRequest<NewArticle>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let article = state.ledger.publish_article(&actor, request.article).await?;
    Ok((StatusCode::CREATED, Json(json!({ "article": article }))))
}

/// Reading an article also records a read for the analytics views.
pub async fn get_article(
    State(state): State<AppState>,
    MaybeActor(reader): MaybeActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let article = state.ledger.get_article(&slug, reader.as_ref()).await?;
    Ok(Json(json!({ "article": article })))
}

pub async fn update_article(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<ArticleRequest<ArticleChanges>>,
) -> Result<Json<Value>, ApiError> {
    let article = state.ledger.update_article(&actor, &slug, request.article).await?;
    Ok(Json(json!({ "article": article })))
}

pub async fn delete_article(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    state.ledger.delete_article(&actor, &slug).await?;
    Ok(success())
}

pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(query): ApiQuery<CommentsQuery>,
) -> Result<Json<Value>, ApiError> {
    let comments = state.ledger.list_comments(&slug, query.parent).await?;
    let count = comments.len();
    Ok(Json(json!({ "comments": comments, "commentsCount": count })))
}

pub async fn create_comment(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<CommentRequest<NewComment>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let comment = state.ledger.add_comment(&actor, &slug, request.comment).await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

pub async fn get_comment(
    State(state): State<AppState>,
    ApiPath((slug, id)): ApiPath<(String, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    let comment = state.ledger.get_comment(&slug, id).await?;
    Ok(Json(json!({ "comment": comment })))
}

pub async fn edit_comment(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath((slug, id)): ApiPath<(String, Uuid)>,
    ApiJson(request): ApiJson<CommentRequest<CommentEdit>>,
) -> Result<Json<Value>, ApiError> {
    let comment = state
        .ledger
        .edit_comment(&actor, &slug, id, request.comment.body)
        .await?;
    Ok(Json(json!({ "comment": comment })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    RequireActor(actor): RequireActor,
    ApiPath((slug, id)): ApiPath<(String, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    state.ledger.delete_comment(&actor, &slug, id).await?;
    Ok(success())
}
