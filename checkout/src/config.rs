//! Checkout configuration.
//!
//! Gateway credentials, merchant identity and payment limits are provided
//! by the application at construction time, never read from ambient
//! globals.

use crate::error::{CheckoutError, Result};
use crate::types::PaymentMethod;
use storefront_cart::Money;

/// Payment amount limits.
///
/// The COD ceiling is deliberately lower than the online-payment ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLimits {
    /// Smallest accepted order total
    pub min_amount: Money,
    /// Largest accepted order total for online payments
    pub max_amount: Money,
    /// Largest accepted order total for cash on delivery
    pub cod_max_amount: Money,
}

impl PaymentLimits {
    /// Checks an order total against the limits for the chosen method
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AmountOutOfRange`] when the total falls
    /// outside the accepted range.
    pub fn validate(&self, amount: Money, method: PaymentMethod) -> Result<()> {
        let max = match method {
            PaymentMethod::Cod => self.cod_max_amount,
            PaymentMethod::Upi | PaymentMethod::Card => self.max_amount,
        };

        if amount < self.min_amount || amount > max {
            return Err(CheckoutError::AmountOutOfRange {
                amount,
                min: self.min_amount,
                max,
            });
        }
        Ok(())
    }
}

impl Default for PaymentLimits {
    fn default() -> Self {
        Self {
            min_amount: Money::from_rupees(1),
            max_amount: Money::from_rupees(1_000_000),
            cod_max_amount: Money::from_rupees(20_000),
        }
    }
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Gateway key id handed to the payment widget
    pub key_id: String,
    /// Shop display name shown in the payment widget
    pub shop_name: String,
    /// ISO currency code for pending orders
    pub currency: String,
    /// Merchant VPA used for the UPI collect flow
    pub upi_vpa: String,
    /// Payment amount limits
    pub limits: PaymentLimits,
}

impl CheckoutConfig {
    /// Create a new configuration with the given gateway key id
    #[must_use]
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            ..Self::default()
        }
    }

    /// Set the shop display name
    #[must_use]
    pub fn with_shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.shop_name = shop_name.into();
        self
    }

    /// Set the currency code
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the merchant VPA for UPI collect
    #[must_use]
    pub fn with_upi_vpa(mut self, upi_vpa: impl Into<String>) -> Self {
        self.upi_vpa = upi_vpa.into();
        self
    }

    /// Set the payment limits
    #[must_use]
    pub fn with_limits(mut self, limits: PaymentLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            key_id: "rzp_test_key".to_string(),
            shop_name: "Your Shop Name".to_string(),
            currency: "INR".to_string(),
            upi_vpa: "7735587118@fam".to_string(),
            limits: PaymentLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_accept_amount_in_range() {
        let limits = PaymentLimits::default();
        assert!(
            limits
                .validate(Money::from_rupees(500), PaymentMethod::Card)
                .is_ok()
        );
    }

    #[test]
    fn cod_ceiling_is_lower() {
        let limits = PaymentLimits::default();
        let amount = Money::from_rupees(50_000);

        assert!(limits.validate(amount, PaymentMethod::Upi).is_ok());
        assert!(matches!(
            limits.validate(amount, PaymentMethod::Cod),
            Err(CheckoutError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn zero_total_is_below_minimum() {
        let limits = PaymentLimits::default();
        assert!(
            limits
                .validate(Money::from_paise(0), PaymentMethod::Card)
                .is_err()
        );
    }
}
