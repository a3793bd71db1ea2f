//! Catalog API provider.
//!
//! The [`ProductCatalog`] trait is the capability seam between the catalog
//! reducer and the backend; [`HttpCatalog`] is the production
//! implementation speaking the backend's JSON contract.

use crate::error::{CatalogError, Result};
use crate::types::Product;
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use storefront_cart::{Money, ProductId};

/// Catalog API capability
///
/// Abstraction over the backend catalog endpoints so reducers can be
/// tested against [`crate::mocks::InMemoryCatalog`].
pub trait ProductCatalog: Send + Sync {
    /// Fetch the product list, optionally filtered by category
    ///
    /// A filter of `None` or `"All"` (case-insensitive) returns every
    /// product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable, answers with a
    /// non-success status, or the body cannot be decoded.
    fn fetch_products(
        &self,
        category: Option<String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>>> + Send>>;

    /// Fetch a single product by id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids, and transport
    /// or decode errors otherwise.
    fn fetch_product(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<Product>> + Send>>;

    /// Fetch the category labels
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable, answers with a
    /// non-success status, or the body cannot be decoded.
    fn fetch_categories(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send>>;
}

/// Wire shape of a product as the backend serves it
///
/// Prices arrive as float rupees; the domain uses integer paise, so the
/// conversion happens here and nowhere else.
#[derive(Debug, Deserialize)]
struct ProductDto {
    id: u64,
    name: String,
    description: String,
    price: f64,
    stock: u32,
    image_url: String,
    category: String,
    #[serde(default)]
    specifications: HashMap<String, String>,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let price = Money::from_paise((dto.price * 100.0).round().max(0.0) as u64);
        Self {
            id: ProductId::new(dto.id),
            name: dto.name,
            description: dto.description,
            price,
            stock: dto.stock,
            image_url: dto.image_url,
            category: dto.category,
            specifications: dto.specifications,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// HTTP implementation of [`ProductCatalog`]
///
/// Speaks to the backend's `/api/products`, `/api/products/{id}` and
/// `/api/categories` endpoints.
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a catalog client against the given API base URL
    /// (e.g. `http://localhost:5000/api`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn decode_error(response: reqwest::Response) -> CatalogError {
        let status = response.status().as_u16();
        let message = match response.json::<ApiError>().await {
            Ok(body) => body.error,
            Err(_) => "unexpected response".to_string(),
        };
        CatalogError::Api { status, message }
    }
}

impl ProductCatalog for HttpCatalog {
    fn fetch_products(
        &self,
        category: Option<String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Product>>> + Send>> {
        let client = self.client.clone();
        let url = self.endpoint("products");

        Box::pin(async move {
            let mut request = client.get(url);
            if let Some(category) = category {
                request = request.query(&[("category", category)]);
            }

            let response = request.send().await.map_err(CatalogError::network)?;
            if !response.status().is_success() {
                return Err(Self::decode_error(response).await);
            }

            let products: Vec<ProductDto> =
                response.json().await.map_err(CatalogError::malformed)?;
            tracing::debug!(count = products.len(), "fetched product list");
            Ok(products.into_iter().map(Product::from).collect())
        })
    }

    fn fetch_product(
        &self,
        id: ProductId,
    ) -> Pin<Box<dyn Future<Output = Result<Product>> + Send>> {
        let client = self.client.clone();
        let url = self.endpoint(&format!("products/{id}"));

        Box::pin(async move {
            let response = client.get(url).send().await.map_err(CatalogError::network)?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(CatalogError::NotFound { id });
            }
            if !response.status().is_success() {
                return Err(Self::decode_error(response).await);
            }

            let product: ProductDto = response.json().await.map_err(CatalogError::malformed)?;
            Ok(Product::from(product))
        })
    }

    fn fetch_categories(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send>> {
        let client = self.client.clone();
        let url = self.endpoint("categories");

        Box::pin(async move {
            let response = client.get(url).send().await.map_err(CatalogError::network)?;
            if !response.status().is_success() {
                return Err(Self::decode_error(response).await);
            }

            response.json().await.map_err(CatalogError::malformed)
        })
    }
}
