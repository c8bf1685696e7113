//! Configuration module for the Haven API.
//! Reads settings from the environment and wires the ledger's dependencies.
mod dependencies;
mod settings;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

pub use dependencies::Dependencies;
pub use settings::{AppConfig, LogFormat, StorageBackend};

/// Create CORS layer for localhost development
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
