//! The orchestrator's arrow back into the cart store.
//!
//! A settled purchase ends with the cart being cleared. Rather than
//! leaving that to ad-hoc glue in the application, the orchestrator owns
//! the arrow through this port, injected like every other collaborator so
//! tests can record it.

use std::future::Future;
use std::pin::Pin;
use storefront_cart::{CartAction, CartReducer, CartState};
use storefront_runtime::Store;

/// Cart port used by the checkout orchestrator
pub trait CartLink: Send + Sync {
    /// Empty the cart after a settled purchase
    fn clear(&self) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// [`CartLink`] backed by the real cart store
#[derive(Clone)]
pub struct StoreCartLink {
    store: Store<CartState, CartAction, (), CartReducer>,
}

impl StoreCartLink {
    /// Creates a link onto the given cart store handle
    #[must_use]
    pub const fn new(store: Store<CartState, CartAction, (), CartReducer>) -> Self {
        Self { store }
    }
}

impl CartLink for StoreCartLink {
    fn clear(&self) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let store = self.store.clone();
        Box::pin(async move {
            store.send(CartAction::Clear).await;
        })
    }
}
