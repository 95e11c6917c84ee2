use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use crate::{
    error::{AppResult, ErrorDetail, ValidationError},
    handlers::extract::{ProductBody, ProductId},
    models::Product,
    AppState,
};

#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct Message {
    pub message: String,
}

// ── Create ────────────────────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/products/",
    tag = "Products",
    request_body = Product,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 422, description = "Body failed validation", body = ValidationError)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ProductBody(payload): ProductBody,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.store.create(payload).await?;

    info!(id = product.id, title = %product.title, "Created product");

    Ok((StatusCode::OK, Json(product)))
}

// ── List ──────────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/products/",
    tag = "Products",
    responses(
        (status = 200, description = "All products in creation order", body = [Product])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Vec<Product>>)> {
    let products = state.store.list().await?;

    debug!(count = products.len(), "Listed products");

    Ok((StatusCode::OK, Json(products)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "First product with this id", body = Product),
        (status = 404, description = "No product with this id", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ValidationError)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.store.get(id).await?;

    debug!(id, "Fetched product");

    Ok((StatusCode::OK, Json(product)))
}

// ── Update ────────────────────────────────────────────────────────────────────

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = Product,
    responses(
        (status = 200, description = "Replacement product", body = Product),
        (status = 404, description = "No product with this id", body = ErrorDetail),
        (status = 422, description = "Body or id failed validation", body = ValidationError)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<ProductId, ValidationError>,
    body: Result<ProductBody, ValidationError>,
) -> AppResult<(StatusCode, Json<Product>)> {
    // Path and body failures are reported together.
    let (ProductId(id), ProductBody(payload)) = match (id, body) {
        (Ok(id), Ok(body)) => (id, body),
        (id, body) => {
            return Err(ValidationError::combine(id.err().into_iter().chain(body.err())).into());
        }
    };

    let product = state.store.update(id, payload).await?;

    info!(id, new_id = product.id, "Updated product");

    Ok((StatusCode::OK, Json(product)))
}

// ── Delete ────────────────────────────────────────────────────────────────────

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = Message),
        (status = 404, description = "No product with this id", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ValidationError)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<(StatusCode, Json<Message>)> {
    state.store.delete(id).await?;

    info!(id, "Deleted product");

    Ok((
        StatusCode::OK,
        Json(Message {
            message: "Product deleted".to_string(),
        }),
    ))
}
