//! Error types for checkout operations.
//!
//! Errors are `Clone + PartialEq` because they live inside
//! [`crate::types::CheckoutStatus::Failed`] and are compared in tests. No
//! error here is fatal to the process: all of them are scoped to the
//! current checkout session, and the session stays resumable with cart and
//! entered data intact.

use storefront_cart::Money;
use thiserror::Error;

/// Result type alias for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Failures in the checkout flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Bad customer input; blocks the step transition, recovered locally.
    #[error("{message}")]
    Validation {
        /// Message shown next to the form
        message: String,
    },

    /// The Order API was unreachable.
    #[error("Order service unreachable: {message}")]
    Network {
        /// Transport-level failure description
        message: String,
    },

    /// The Order API refused the request.
    #[error("Order rejected: {message}")]
    OrderRejected {
        /// Error message from the response body
        message: String,
    },

    /// The payment gateway client failed to load; no order was created.
    #[error("Payment gateway failed to load")]
    GatewayUnavailable,

    /// The shopper dismissed the payment widget before completing payment.
    #[error("Payment cancelled")]
    Cancelled,

    /// The gateway reported a payment but the backend rejected it.
    ///
    /// The cart is deliberately left untouched in this case: the payment
    /// may have been charged without being confirmed.
    #[error("Payment verification failed: {message}")]
    VerificationRejected {
        /// Rejection detail from the Order API
        message: String,
    },

    /// The order total falls outside the configured payment limits.
    #[error("Amount {amount} is outside the allowed range {min} to {max}")]
    AmountOutOfRange {
        /// The refused order total
        amount: Money,
        /// Smallest accepted amount
        min: Money,
        /// Largest accepted amount for the chosen payment method
        max: Money,
    },
}

impl CheckoutError {
    /// Builds a [`CheckoutError::Validation`] with the given message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Builds a [`CheckoutError::Network`] from any transport error
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}
