use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

pub type AppResult<T> = Result<T, AppError>;

/// One failed check on an inbound value, located by a path such as
/// `["body", "price"]` or `["path", "id"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], kind: &str, msg: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Every problem found while checking an inbound value. Serializes as the
/// 422 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, thiserror::Error)]
#[error("{} invalid field(s)", .detail.len())]
pub struct ValidationError {
    pub detail: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(loc: &[&str], kind: &str, msg: &str) -> Self {
        Self {
            detail: vec![FieldError::new(loc, kind, msg)],
        }
    }

    /// Joins several error lists into one, keeping their order.
    pub fn combine(errors: impl IntoIterator<Item = ValidationError>) -> Self {
        Self {
            detail: errors.into_iter().flat_map(|e| e.detail).collect(),
        }
    }

    /// Field names (last `loc` segment) in the order they were reported.
    #[cfg(test)]
    pub fn fields(&self) -> Vec<&str> {
        self.detail
            .iter()
            .filter_map(|e| e.loc.last().map(String::as_str))
            .collect()
    }
}

/// Body of 404 and 500 responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        AppError::Validation(self).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, Json(err)).into_response(),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": msg }))).into_response()
            }
            AppError::Internal(err) => {
                error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_serializes_type_key() {
        let err = ValidationError::single(&["body", "price"], "float_type", "Input should be a valid number");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({
                "detail": [{
                    "loc": ["body", "price"],
                    "msg": "Input should be a valid number",
                    "type": "float_type",
                }]
            })
        );
    }

    #[test]
    fn status_codes() {
        let not_found = AppError::NotFound("Product not found".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(ValidationError::single(&["body"], "missing", "Field required"))
            .into_response();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal = AppError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn combine_keeps_order() {
        let path = ValidationError::single(&["path", "id"], "int_parsing", "bad id");
        let body = ValidationError::single(&["body", "title"], "missing", "Field required");
        let merged = ValidationError::combine([path, body]);
        assert_eq!(merged.fields(), vec!["id", "title"]);
        assert_eq!(merged.detail[0].loc, vec!["path", "id"]);
    }

    #[test]
    fn fields_lists_last_segment() {
        let err = ValidationError {
            detail: vec![
                FieldError::new(&["body", "title"], "missing", "Field required"),
                FieldError::new(&["body", "price"], "float_type", "Input should be a valid number"),
            ],
        };
        assert_eq!(err.fields(), vec!["title", "price"]);
    }
}
