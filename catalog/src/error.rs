//! Error types for catalog operations.

use serde::{Deserialize, Serialize};
use storefront_cart::ProductId;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures while loading catalog data.
///
/// Errors are `Clone + PartialEq` because they are stored in state for the
/// view layer to display.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogError {
    /// The catalog API was unreachable.
    #[error("Catalog unreachable: {message}")]
    Network {
        /// Transport-level failure description
        message: String,
    },

    /// The catalog API answered with a non-success status.
    #[error("Catalog request failed ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// No product exists with the requested id.
    #[error("Product {id} not found")]
    NotFound {
        /// The requested product id
        id: ProductId,
    },

    /// The response body could not be decoded.
    #[error("Malformed catalog response: {message}")]
    Malformed {
        /// Decode failure description
        message: String,
    },
}

impl CatalogError {
    /// Builds a [`CatalogError::Network`] from any transport error
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }

    /// Builds a [`CatalogError::Malformed`] from any decode error
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Malformed {
            message: err.to_string(),
        }
    }
}
