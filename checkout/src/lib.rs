//! Checkout orchestrator.
//!
//! Drives a shopper from information entry through payment-method selection
//! and confirmation to payment settlement, reconciling with two external
//! services: the Order API (pending-order creation and payment
//! verification) and the hosted Payment Gateway widget (UPI/card
//! collection). Cash on delivery settles against the Order API alone.
//!
//! The whole flow is one state machine ([`CheckoutState`]) reduced by
//! [`CheckoutReducer`]. The view layer sends intents (`Next`, `Back`,
//! `PlaceOrder`, field edits) and renders state snapshots; settlement
//! progress arrives as reducer-fed events produced by effects. External
//! services hang behind the capability traits in [`providers`], so every
//! path is testable against the [`mocks`].
//!
//! Failure philosophy: every external call may fail independently; failure
//! degrades to `status = Failed` with cart and entered data preserved, and
//! retrying is the shopper pressing Place Order again. Nothing is retried
//! automatically.

#![forbid(unsafe_code)]

pub mod config;
pub mod environment;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;
pub mod providers;
pub mod reducer;
pub mod types;

pub use config::{CheckoutConfig, PaymentLimits};
pub use environment::CheckoutEnvironment;
pub use error::CheckoutError;
pub use reducer::{CheckoutAction, CheckoutReducer};
pub use types::{
    CheckoutSession, CheckoutState, CheckoutStatus, CheckoutStep, CustomerField, CustomerInfo,
    PaymentMethod, PendingOrder, PaymentResult,
};
