//! Shopping cart state container.
//!
//! The cart is the authoritative in-memory record of intended purchases
//! for the current browsing session. It is a leaf feature: a pure reducer
//! with no environment and no effects. The checkout orchestrator reads a
//! [`CartState`] snapshot when a session begins and clears the cart once a
//! purchase settles.
//!
//! This crate also hosts the domain scalars shared across the storefront
//! ([`Money`], [`ProductId`]), since every other feature builds on them.

#![forbid(unsafe_code)]

pub mod reducer;
pub mod types;

pub use reducer::{CartAction, CartReducer};
pub use types::{CartItem, CartState, Money, ProductId, ProductSummary};
