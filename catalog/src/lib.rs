//! Product catalog state container.
//!
//! Holds the product list the shopper browses, the active category filter,
//! and the currently opened product detail. Data comes from the backend
//! catalog API through the injected [`providers::ProductCatalog`]
//! capability; load failures land in state and nothing is retried
//! automatically.

#![forbid(unsafe_code)]

pub mod error;
pub mod mocks;
pub mod providers;
pub mod reducer;
pub mod types;

pub use error::CatalogError;
pub use providers::{HttpCatalog, ProductCatalog};
pub use reducer::{CatalogAction, CatalogEnvironment, CatalogReducer};
pub use types::{CatalogState, Product};
