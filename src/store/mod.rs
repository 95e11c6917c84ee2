use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::Product;

pub const NOT_FOUND_MESSAGE: &str = "Product not found";

fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
}

/// The five operations handlers need from product storage.
///
/// Lookups match on `id` and act on the first match by insertion position;
/// duplicate ids are allowed.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Append a product and return it unchanged.
    async fn create(&self, product: Product) -> AppResult<Product>;

    /// All products in insertion order.
    async fn list(&self) -> AppResult<Vec<Product>>;

    async fn get(&self, id: i64) -> AppResult<Product>;

    /// Replace the first product with `id` by `replacement`, in place.
    /// `replacement.id` is not required to equal `id`.
    async fn update(&self, id: i64, replacement: Product) -> AppResult<Product>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Ordered, in-memory product list. Every operation scans linearly.
///
/// Clones share the same list. Mutations hold the write lock across the scan
/// and the change, so a concurrent delete cannot shift positions between them.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, product: Product) -> AppResult<Product> {
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get(&self, id: i64) -> AppResult<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn update(&self, id: i64, replacement: Product) -> AppResult<Product> {
        let mut products = self.products.write().await;
        let slot = products.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
        *slot = replacement.clone();
        Ok(replacement)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut products = self.products.write().await;
        let index = products.iter().position(|p| p.id == id).ok_or_else(not_found)?;
        products.remove(index);
        Ok(())
    }
}
