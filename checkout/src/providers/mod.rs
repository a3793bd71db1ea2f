//! External-service capabilities consumed by the checkout orchestrator.
//!
//! Each collaborator sits behind a trait so the reducer can be exercised
//! against the [`crate::mocks`]:
//!
//! - [`OrderApi`] - pending-order creation and payment verification
//! - [`PaymentGateway`] - the hosted payment widget
//! - [`CartLink`] - the arrow back into the cart store after settlement

mod cart_link;
mod gateway;
mod http_order_api;
mod order_api;

pub use cart_link::{CartLink, StoreCartLink};
pub use gateway::{GatewayOptions, GatewayPrefill, PaymentGateway, UpiOptions};
pub use http_order_api::HttpOrderApi;
pub use order_api::OrderApi;
