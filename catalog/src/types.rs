//! Domain types for the catalog feature.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storefront_cart::{Money, ProductId, ProductSummary};

/// A catalog product as served by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Long-form description
    pub description: String,
    /// Unit price
    pub price: Money,
    /// Units in stock
    pub stock: u32,
    /// Product image URL
    pub image_url: String,
    /// Category label used for filtering
    pub category: String,
    /// Free-form specification table
    pub specifications: HashMap<String, String>,
}

impl Product {
    /// The slice of this product the cart needs for a line item
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
        }
    }

    /// Whether any units are left to sell
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// State of the catalog feature
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogState {
    /// Products for the active category filter, in API order
    pub products: Vec<Product>,
    /// Known category labels ("All" first, as served)
    pub categories: Vec<String>,
    /// Active category filter (`None` means all products)
    pub category_filter: Option<String>,
    /// The product currently opened in detail view
    pub selected: Option<Product>,
    /// Whether a load is in flight
    pub loading: bool,
    /// The most recent load failure, if any
    pub last_error: Option<CatalogError>,
}

impl CatalogState {
    /// Creates a new empty catalog state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            category_filter: None,
            selected: None,
            loading: false,
            last_error: None,
        }
    }

    /// Returns a loaded product by id, if present in the current list
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}
