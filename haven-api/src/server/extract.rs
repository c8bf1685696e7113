//! Body, path and query extractors whose rejections render as `ApiError`.
//!
//! axum's own extractors answer malformed input with a plain-text 400 or 422;
//! these wrappers keep every client error in the `{"errors": ...}` shape.
use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
