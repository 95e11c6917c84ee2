use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use crate::error::{ErrorDetail, FieldError, ValidationError};
use crate::handlers::products::{self, Message};
use crate::models::Product;
use crate::store::{InMemoryProductStore, ProductStore};

/// Shared application state. Cheap to clone; the store sits behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InMemoryProductStore::new())
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product API",
        description = "Basic API for managing products",
        version = "1.0.0"
    ),
    paths(
        products::create_product,
        products::list_products,
        products::get_product,
        products::update_product,
        products::delete_product
    ),
    components(schemas(Product, Message, ErrorDetail, FieldError, ValidationError)),
    tags((name = "Products", description = "In-memory product catalog"))
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health / metadata ───────────────────────────────────────────────
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi))

        // ── Products CRUD ───────────────────────────────────────────────────
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
