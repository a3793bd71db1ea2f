//! Order API capability.

use crate::error::Result;
use crate::types::{CustomerInfo, PaymentResult, PaymentVerification, PendingOrder};
use std::future::Future;
use std::pin::Pin;
use storefront_cart::Money;

/// Order API capability
///
/// Abstraction over the backend endpoints the checkout flow depends on.
/// Amounts cross this boundary in minor units.
pub trait OrderApi: Send + Sync {
    /// Create a pending order ahead of online payment collection
    ///
    /// # Errors
    ///
    /// Returns a network error when the API is unreachable and an
    /// order-rejected error on a non-success response.
    fn create_order(
        &self,
        amount: Money,
        currency: &str,
        customer: &CustomerInfo,
    ) -> Pin<Box<dyn Future<Output = Result<PendingOrder>> + Send>>;

    /// Verify a gateway payment against the pending order
    ///
    /// # Errors
    ///
    /// Returns a verification-rejected error when the backend does not
    /// report success, and a network error when it is unreachable.
    fn verify_payment(
        &self,
        payment: &PaymentResult,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentVerification>> + Send>>;

    /// Create a cash-on-delivery order; returns the order reference
    ///
    /// # Errors
    ///
    /// Returns a network error when the API is unreachable and an
    /// order-rejected error on a non-success response.
    fn create_cod_order(
        &self,
        amount: Money,
        customer: &CustomerInfo,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send>>;
}
