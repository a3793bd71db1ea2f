//! Mock catalog provider for development and testing.

use crate::error::{CatalogError, Result};
use crate::providers::ProductCatalog;
use crate::types::Product;
use std::future::Future;
use std::pin::Pin;
use storefront_cart::ProductId;

/// In-memory implementation of [`ProductCatalog`]
///
/// Serves a fixed product list; category filtering matches the backend's
/// behavior (missing or `"All"` means everything). Can be switched into a
/// failing mode to exercise error paths.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    fail: bool,
}

impl InMemoryCatalog {
    /// Creates a catalog serving the given products
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            fail: false,
        }
    }

    /// Creates a catalog whose every call fails with a network error
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            products: Vec::new(),
            fail: true,
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.fail {
            return Err(CatalogError::Network {
                message: "mock catalog configured to fail".to_string(),
            });
        }
        Ok(())
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn fetch_products(
        &self,
        category: Option<String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>>> + Send>> {
        let available = self.check_available();
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|product| match &category {
                None => true,
                Some(filter) if filter.eq_ignore_ascii_case("all") => true,
                Some(filter) => product.category == *filter,
            })
            .cloned()
            .collect();

        Box::pin(async move {
            available?;
            Ok(products)
        })
    }

    fn fetch_product(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<Product>> + Send>> {
        let available = self.check_available();
        let product = self.products.iter().find(|p| p.id == id).cloned();

        Box::pin(async move {
            available?;
            product.ok_or(CatalogError::NotFound { id })
        })
    }

    fn fetch_categories(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send>> {
        let available = self.check_available();
        let mut categories = vec!["All".to_string()];
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        Box::pin(async move {
            available?;
            Ok(categories)
        })
    }
}
