//! Payment gateway capability.
//!
//! The production gateway is a hosted widget driven by a client library
//! the host environment loads once. The orchestrator only depends on this
//! trait: `ensure_loaded` performs the one-time load, `open` presents the
//! collection UI and resolves with the shopper's outcome. Dismissing the
//! widget is an error value ([`crate::CheckoutError::Cancelled`]), not an
//! exceptional condition.

use crate::config::CheckoutConfig;
use crate::error::Result;
use crate::types::{CustomerInfo, PaymentMethod, PaymentResult, PendingOrder};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

/// Payment gateway capability
pub trait PaymentGateway: Send + Sync {
    /// Load the gateway client library
    ///
    /// Idempotent: the first call performs the load, later calls resolve
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CheckoutError::GatewayUnavailable`] when the
    /// client library cannot be loaded.
    fn ensure_loaded(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send>>;

    /// Open the payment collection UI for a pending order
    ///
    /// Resolves once the shopper completes or dismisses the widget. The
    /// widget is an external, opaque process: it cannot be cancelled from
    /// here, only dismissed by the shopper.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CheckoutError::Cancelled`] on dismissal and
    /// [`crate::CheckoutError::GatewayUnavailable`] on widget failures.
    fn open(
        &self,
        options: GatewayOptions,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentResult>> + Send>>;
}

/// Contact details pre-filled into the payment widget
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GatewayPrefill {
    /// Shopper name
    pub name: String,
    /// Shopper email
    pub email: String,
    /// Shopper phone number
    pub contact: String,
}

/// UPI collect-flow configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UpiOptions {
    /// Collection flow, always `"collect"`
    pub flow: String,
    /// Merchant VPA the collect request is raised against
    pub vpa: String,
}

/// Everything the payment widget needs to collect a payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GatewayOptions {
    /// Gateway key id
    pub key: String,
    /// Amount in minor units
    pub amount: u64,
    /// ISO currency code
    pub currency: String,
    /// Shop display name
    pub name: String,
    /// Line shown under the shop name
    pub description: String,
    /// The pending order this payment settles
    pub order_id: String,
    /// Pre-filled contact details
    pub prefill: GatewayPrefill,
    /// Payment method restriction (`"upi"` for the collect flow)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// UPI collect configuration, present only for UPI payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi: Option<UpiOptions>,
}

impl GatewayOptions {
    /// Build widget options for a pending order
    #[must_use]
    pub fn new(config: &CheckoutConfig, order: &PendingOrder, customer: &CustomerInfo) -> Self {
        Self {
            key: config.key_id.clone(),
            amount: order.amount.paise(),
            currency: order.currency.clone(),
            name: config.shop_name.clone(),
            description: "Purchase Payment".to_string(),
            order_id: order.id.clone(),
            prefill: GatewayPrefill {
                name: customer.name.clone(),
                email: customer.email.clone(),
                contact: customer.phone.clone(),
            },
            method: None,
            upi: None,
        }
    }

    /// Restrict the widget to the chosen payment method
    ///
    /// UPI switches the widget into the collect flow against the
    /// configured merchant VPA; cards keep the widget's default surface.
    #[must_use]
    pub fn for_method(mut self, method: PaymentMethod, config: &CheckoutConfig) -> Self {
        if method == PaymentMethod::Upi {
            self.method = Some("upi".to_string());
            self.upi = Some(UpiOptions {
                flow: "collect".to_string(),
                vpa: config.upi_vpa.clone(),
            });
        }
        self
    }
}
