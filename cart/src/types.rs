//! Domain types for the cart feature.
//!
//! [`Money`] and [`ProductId`] are shared by the catalog and checkout
//! crates as well; the cart crate owns them because it is the leaf of the
//! dependency graph.

use serde::{Deserialize, Serialize};

/// Unique identifier for a product
///
/// The catalog serves integer ids, so this is an integer newtype rather
/// than a UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a `ProductId` from its integer value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the inner integer value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money amount in paise (avoids floating point issues)
///
/// All amounts in the storefront are integer minor units; conversion to
/// rupees only happens in display code.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` amount from paise
    #[must_use]
    pub const fn from_paise(paise: u64) -> Self {
        Self(paise)
    }

    /// Creates a `Money` amount from whole rupees
    #[must_use]
    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees * 100)
    }

    /// Returns the amount in paise
    #[must_use]
    pub const fn paise(self) -> u64 {
        self.0
    }

    /// Checks if this amount is zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * u64::from(rhs))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(0), |acc, amount| acc + amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// The display metadata a product carries into the cart
///
/// This is the slice of a catalog product the cart needs for line items;
/// stock, category and description stay behind in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product identifier (stable line-item key)
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: Money,
    /// Product image URL
    pub image_url: String,
}

/// A single line item: a product plus the requested quantity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier (stable line-item key)
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: Money,
    /// Product image URL
    pub image_url: String,
    /// Requested quantity, always >= 1 (an item reaching 0 is removed)
    pub quantity: u32,
}

impl CartItem {
    /// Creates a line item for one unit of a product
    #[must_use]
    pub fn new(product: ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            quantity: 1,
        }
    }

    /// The line total (`price × quantity`)
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// State of the shopping cart
///
/// Items are kept in insertion order and unique by product id; re-adding a
/// product increments its quantity instead of inserting a duplicate entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    /// Line items in insertion order
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Creates a new empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Checks if the cart holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct line items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the line item for a product, if present
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the quantity held for a product (0 when absent)
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// The cart total, recomputed from the current items on every call
    ///
    /// Never cached as separate state, so it cannot drift from the items.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }
}
