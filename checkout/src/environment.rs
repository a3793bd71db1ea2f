//! Checkout environment.
//!
//! Everything the checkout reducer touches beyond its own state arrives
//! through here: the Order API, the payment gateway, the cart port, a
//! clock, and the merchant configuration. Constructed by the application
//! and injected into the store; no hidden globals.

use crate::config::CheckoutConfig;
use crate::providers::{CartLink, OrderApi, PaymentGateway};
use std::sync::Arc;
use storefront_core::environment::Clock;

/// Dependencies for the checkout reducer
#[derive(Clone)]
pub struct CheckoutEnvironment {
    /// Order API client
    pub orders: Arc<dyn OrderApi>,
    /// Payment gateway widget
    pub gateway: Arc<dyn PaymentGateway>,
    /// Port back into the cart store
    pub cart: Arc<dyn CartLink>,
    /// Clock for session timestamps
    pub clock: Arc<dyn Clock>,
    /// Merchant configuration
    pub config: CheckoutConfig,
}

impl CheckoutEnvironment {
    /// Creates a new `CheckoutEnvironment`
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrderApi>,
        gateway: Arc<dyn PaymentGateway>,
        cart: Arc<dyn CartLink>,
        clock: Arc<dyn Clock>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            orders,
            gateway,
            cart,
            clock,
            config,
        }
    }
}
