pub mod extract;
pub mod products;

use axum::{http::StatusCode, Json};
use serde_json::json;
use utoipa::OpenApi;

use crate::ApiDoc;

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": "product-api" })))
}

/// API metadata document: title, description, version and the product routes.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
