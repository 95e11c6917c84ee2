use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
};
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::Product;

/// Request body checked against the product shape.
///
/// A body without a `Content-Type` header is read as JSON. An empty body
/// reports the body as missing; any non-JSON content type, malformed JSON or
/// schema failure rejects with 422.
pub struct ProductBody(pub Product);

#[async_trait]
impl<S> FromRequest<S> for ProductBody
where
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content = is_json_content(req.headers());

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            ValidationError::single(&["body"], "json_invalid", &rejection.body_text())
        })?;

        if bytes.is_empty() {
            return Err(ValidationError::single(&["body"], "missing", "Field required"));
        }
        if !json_content {
            return Err(ValidationError::single(
                &["body"],
                "json_invalid",
                "Expected request with `Content-Type: application/json`",
            ));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|err| {
            ValidationError::single(&["body"], "json_invalid", &format!("JSON decode error: {err}"))
        })?;

        Ok(ProductBody(Product::from_json(&value)?))
    }
}

/// No header, `application/json`, or any `application/*+json` type.
fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

/// Integer `:id` path segment.
pub struct ProductId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::single(&["path", "id"], "path_invalid", &rejection.body_text()))?;

        raw.trim().parse::<i64>().map(ProductId).map_err(|_| {
            ValidationError::single(
                &["path", "id"],
                "int_parsing",
                "Input should be a valid integer, unable to parse string as an integer",
            )
        })
    }
}
