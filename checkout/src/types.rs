//! Domain types for the checkout feature.

use crate::error::{CheckoutError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_cart::{CartState, Money};

/// The three steps of the checkout wizard, forward/back navigable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Collecting name, email, phone and delivery address
    CollectingInfo,
    /// Choosing between UPI, card and cash on delivery
    ChoosingPayment,
    /// Reviewing the order summary before placing it
    Confirming,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CollectingInfo => write!(f, "Customer Information"),
            Self::ChoosingPayment => write!(f, "Payment Method"),
            Self::Confirming => write!(f, "Confirm Order"),
        }
    }
}

/// How the shopper pays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// UPI collect flow through the gateway widget
    Upi,
    /// Credit/debit card through the gateway widget
    Card,
    /// Cash on delivery; no online payment step
    Cod,
}

impl PaymentMethod {
    /// Whether this method settles through the payment gateway
    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Upi | Self::Card)
    }
}

/// A single editable customer-info field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerField {
    /// Full name
    Name,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Delivery address
    Address,
}

/// Contact and delivery details collected in the first step
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number (10 digits)
    pub phone: String,
    /// Delivery address
    pub address: String,
}

impl CustomerInfo {
    /// Overwrite a single field
    pub fn set(&mut self, field: CustomerField, value: String) {
        match field {
            CustomerField::Name => self.name = value,
            CustomerField::Email => self.email = value,
            CustomerField::Phone => self.phone = value,
            CustomerField::Address => self.address = value,
        }
    }

    /// Validate all fields before leaving the information step
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] when a field is empty, the
    /// email lacks a `local@domain.tld` shape, or the phone is not exactly
    /// 10 digits.
    pub fn validate(&self) -> Result<()> {
        if [&self.name, &self.email, &self.phone, &self.address]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(CheckoutError::validation(
                "Please fill in all required fields",
            ));
        }
        if !email_shape_ok(&self.email) {
            return Err(CheckoutError::validation(
                "Please enter a valid email address",
            ));
        }
        if !phone_shape_ok(&self.phone) {
            return Err(CheckoutError::validation(
                "Please enter a valid 10-digit phone number",
            ));
        }
        Ok(())
    }
}

/// `local@domain.tld` shape: no whitespace, non-empty local part, and a
/// dot inside the domain with characters on both sides.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(head, tld)| !head.is_empty() && !tld.is_empty())
}

/// Exactly 10 ASCII digits.
fn phone_shape_ok(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Where a checkout session stands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutStatus {
    /// The shopper is walking the wizard
    InProgress,
    /// A settlement is in flight; navigation and re-submission are latched
    Submitting,
    /// The purchase settled; terminal
    Succeeded,
    /// The last settlement attempt failed; resumable from `Confirming`
    Failed {
        /// What went wrong
        error: CheckoutError,
    },
}

impl CheckoutStatus {
    /// Whether a settlement is currently in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Whether the purchase has settled
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// One shopper's progress through checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Current wizard step
    pub step: CheckoutStep,
    /// Collected customer details; editable only in `CollectingInfo`
    pub customer: CustomerInfo,
    /// Chosen payment method, unset until the shopper picks one
    pub payment_method: Option<PaymentMethod>,
    /// Pending-order reference, assigned once the Order API accepts one
    pub order_ref: Option<String>,
    /// Gateway payment reference, assigned on successful settlement
    pub payment_id: Option<String>,
    /// Session status
    pub status: CheckoutStatus,
    /// The last step-transition refusal, shown without leaving the step
    pub validation_error: Option<CheckoutError>,
    /// When the session began
    pub started_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Creates a fresh session at the information step
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            step: CheckoutStep::CollectingInfo,
            customer: CustomerInfo::default(),
            payment_method: None,
            order_ref: None,
            payment_id: None,
            status: CheckoutStatus::InProgress,
            validation_error: None,
            started_at,
        }
    }
}

/// The checkout orchestrator's state machine
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// No checkout in progress
    #[default]
    Idle,
    /// The entry guard tripped: the cart is empty, the view layer should
    /// return to the cart view
    ExitToCart,
    /// A session is running against a cart snapshot
    Active {
        /// The shopper's progress
        session: CheckoutSession,
        /// Snapshot of the cart being purchased; totals are always read
        /// from here
        cart: CartState,
    },
}

impl CheckoutState {
    /// Returns the running session, if any
    #[must_use]
    pub const fn session(&self) -> Option<&CheckoutSession> {
        match self {
            Self::Active { session, .. } => Some(session),
            Self::Idle | Self::ExitToCart => None,
        }
    }

    /// The total of the cart snapshot under purchase
    #[must_use]
    pub fn total(&self) -> Money {
        match self {
            Self::Active { cart, .. } => cart.total(),
            Self::Idle | Self::ExitToCart => Money::from_paise(0),
        }
    }
}

/// A pending order as accepted by the Order API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrder {
    /// Opaque order id
    pub id: String,
    /// Amount in minor units, echoed by the API
    pub amount: Money,
    /// ISO currency code
    pub currency: String,
}

/// The gateway's callback payload after the shopper completes payment
///
/// Field names on the wire follow the gateway's convention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Gateway payment id
    #[serde(rename = "razorpay_payment_id")]
    pub payment_id: String,
    /// Gateway order id (matches the pending order)
    #[serde(rename = "razorpay_order_id")]
    pub order_id: String,
    /// Signature over payment and order ids, checked by the backend
    #[serde(rename = "razorpay_signature")]
    pub signature: String,
}

/// A payment the Order API has verified
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentVerification {
    /// Verified gateway payment id
    pub payment_id: String,
    /// Verified gateway order id
    pub order_id: String,
}
