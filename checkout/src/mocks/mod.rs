//! Mock providers for development and testing.
//!
//! Deterministic stand-ins for the Order API, the payment gateway widget
//! and the cart port. Each mock records its calls so tests can assert on
//! exactly which external requests a flow produced.

use crate::error::{CheckoutError, Result};
use crate::providers::{CartLink, GatewayOptions, OrderApi, PaymentGateway};
use crate::types::{CustomerInfo, PaymentResult, PaymentVerification, PendingOrder};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use storefront_cart::Money;

#[derive(Debug, Default)]
struct OrderApiCalls {
    create_order: AtomicUsize,
    verify: AtomicUsize,
    cod: AtomicUsize,
    last_verify: Mutex<Option<PaymentResult>>,
}

/// In-memory [`OrderApi`] with scriptable failures and call recording
#[derive(Clone, Default)]
pub struct MockOrderApi {
    cod_ref: Option<String>,
    fail_create: Option<CheckoutError>,
    fail_verify: Option<CheckoutError>,
    fail_cod: Option<CheckoutError>,
    calls: Arc<OrderApiCalls>,
}

impl MockOrderApi {
    /// Creates a mock that accepts every request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed order reference for COD orders
    #[must_use]
    pub fn with_cod_ref(mut self, cod_ref: impl Into<String>) -> Self {
        self.cod_ref = Some(cod_ref.into());
        self
    }

    /// Fail `create_order` with the given error
    #[must_use]
    pub fn failing_create(mut self, error: CheckoutError) -> Self {
        self.fail_create = Some(error);
        self
    }

    /// Fail `verify_payment` with the given error
    #[must_use]
    pub fn failing_verify(mut self, error: CheckoutError) -> Self {
        self.fail_verify = Some(error);
        self
    }

    /// Fail `create_cod_order` with the given error
    #[must_use]
    pub fn failing_cod(mut self, error: CheckoutError) -> Self {
        self.fail_cod = Some(error);
        self
    }

    /// How many pending orders were requested
    #[must_use]
    pub fn create_order_calls(&self) -> usize {
        self.calls.create_order.load(Ordering::SeqCst)
    }

    /// How many verifications were requested
    #[must_use]
    pub fn verify_calls(&self) -> usize {
        self.calls.verify.load(Ordering::SeqCst)
    }

    /// How many COD orders were requested
    #[must_use]
    pub fn cod_calls(&self) -> usize {
        self.calls.cod.load(Ordering::SeqCst)
    }

    /// The payload of the most recent verification request
    ///
    /// # Panics
    ///
    /// Panics if the recording mutex was poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
    pub fn last_verify_request(&self) -> Option<PaymentResult> {
        self.calls.last_verify.lock().unwrap().clone()
    }
}

impl OrderApi for MockOrderApi {
    fn create_order(
        &self,
        amount: Money,
        currency: &str,
        _customer: &CustomerInfo,
    ) -> Pin<Box<dyn Future<Output = Result<PendingOrder>> + Send>> {
        self.calls.create_order.fetch_add(1, Ordering::SeqCst);
        let outcome = match &self.fail_create {
            Some(error) => Err(error.clone()),
            None => Ok(PendingOrder {
                id: format!("order_{}", uuid::Uuid::new_v4().simple()),
                amount,
                currency: currency.to_string(),
            }),
        };

        Box::pin(async move { outcome })
    }

    fn verify_payment(
        &self,
        payment: &PaymentResult,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentVerification>> + Send>> {
        self.calls.verify.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        {
            *self.calls.last_verify.lock().unwrap() = Some(payment.clone());
        }

        let outcome = match &self.fail_verify {
            Some(error) => Err(error.clone()),
            None => Ok(PaymentVerification {
                payment_id: payment.payment_id.clone(),
                order_id: payment.order_id.clone(),
            }),
        };

        Box::pin(async move { outcome })
    }

    fn create_cod_order(
        &self,
        _amount: Money,
        _customer: &CustomerInfo,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send>> {
        self.calls.cod.fetch_add(1, Ordering::SeqCst);
        let outcome = match &self.fail_cod {
            Some(error) => Err(error.clone()),
            None => Ok(self
                .cod_ref
                .clone()
                .unwrap_or_else(|| format!("COD-{}", uuid::Uuid::new_v4().simple()))),
        };

        Box::pin(async move { outcome })
    }
}

/// What the mock gateway does when opened
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GatewayBehavior {
    /// The shopper completes payment; a callback with a matching order id
    /// is produced
    #[default]
    Approve,
    /// The shopper dismisses the widget before paying
    Dismiss,
    /// The client library fails to load
    FailLoad,
}

#[derive(Debug, Default)]
struct GatewayCalls {
    loads: AtomicUsize,
    opens: AtomicUsize,
    last_options: Mutex<Option<GatewayOptions>>,
}

/// Scriptable [`PaymentGateway`] with call recording
///
/// The behavior can be switched mid-test to model a shopper who dismisses
/// the widget once and then pays on retry.
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    behavior: Arc<Mutex<GatewayBehavior>>,
    calls: Arc<GatewayCalls>,
}

impl MockPaymentGateway {
    /// Creates a gateway with the given behavior
    #[must_use]
    pub fn new(behavior: GatewayBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            calls: Arc::default(),
        }
    }

    /// Switch the behavior for subsequent calls
    ///
    /// # Panics
    ///
    /// Panics if the behavior mutex was poisoned.
    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
    pub fn set_behavior(&self, behavior: GatewayBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
    fn behavior(&self) -> GatewayBehavior {
        *self.behavior.lock().unwrap()
    }

    /// How many times the client library load was requested
    #[must_use]
    pub fn load_calls(&self) -> usize {
        self.calls.loads.load(Ordering::SeqCst)
    }

    /// How many times the widget was opened
    #[must_use]
    pub fn open_calls(&self) -> usize {
        self.calls.opens.load(Ordering::SeqCst)
    }

    /// The options of the most recent widget open
    ///
    /// # Panics
    ///
    /// Panics if the recording mutex was poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
    pub fn last_options(&self) -> Option<GatewayOptions> {
        self.calls.last_options.lock().unwrap().clone()
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn ensure_loaded(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
        self.calls.loads.fetch_add(1, Ordering::SeqCst);
        let outcome = if self.behavior() == GatewayBehavior::FailLoad {
            Err(CheckoutError::GatewayUnavailable)
        } else {
            Ok(())
        };

        Box::pin(async move { outcome })
    }

    fn open(
        &self,
        options: GatewayOptions,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentResult>> + Send>> {
        self.calls.opens.fetch_add(1, Ordering::SeqCst);
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable in tests
        {
            *self.calls.last_options.lock().unwrap() = Some(options.clone());
        }

        let outcome = match self.behavior() {
            GatewayBehavior::Approve => {
                let payment_id = format!("pay_{}", uuid::Uuid::new_v4().simple());
                tracing::info!(
                    payment_id = %payment_id,
                    order_id = %options.order_id,
                    "mock gateway collected payment"
                );
                Ok(PaymentResult {
                    payment_id,
                    order_id: options.order_id,
                    signature: "sig_mock_valid".to_string(),
                })
            },
            GatewayBehavior::Dismiss => Err(CheckoutError::Cancelled),
            GatewayBehavior::FailLoad => Err(CheckoutError::GatewayUnavailable),
        };

        Box::pin(async move { outcome })
    }
}

/// [`CartLink`] that records clears instead of touching a real store
#[derive(Clone, Default)]
pub struct RecordingCartLink {
    clears: Arc<AtomicUsize>,
}

impl RecordingCartLink {
    /// Creates a new recording link
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the cart was cleared
    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl CartLink for RecordingCartLink {
    fn clear(&self) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Box::pin(async {})
    }
}
