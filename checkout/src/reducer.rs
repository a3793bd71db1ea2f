//! Reducer logic for the checkout orchestrator.
//!
//! The wizard and both settlement paths are driven from here. Settlement
//! is a chain of single-future effects, so at most one external call is
//! outstanding at a time; `CheckoutStatus::Submitting` is the
//! mutual-exclusion latch that refuses navigation and re-submission while
//! the chain runs, and every settlement event is ignored unless the
//! session is actually submitting.

use crate::environment::CheckoutEnvironment;
use crate::error::CheckoutError;
use crate::providers::GatewayOptions;
use crate::types::{
    CheckoutSession, CheckoutState, CheckoutStatus, CheckoutStep, CustomerField, PaymentMethod,
    PaymentResult, PendingOrder,
};
use std::sync::Arc;
use storefront_cart::CartState;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Actions for the checkout orchestrator
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutAction {
    // ========== Commands (view intents) ==========
    /// Command: Start a checkout session over a cart snapshot
    ///
    /// Replaces any session already running. An empty cart trips the entry
    /// guard instead of starting a session.
    Begin {
        /// Snapshot of the cart to purchase
        cart: CartState,
    },

    /// Command: The cart changed outside the orchestrator
    ///
    /// Re-evaluates the empty-cart guard and refreshes the snapshot.
    CartChanged {
        /// The cart's new contents
        cart: CartState,
    },

    /// Command: Overwrite one customer-info field
    SetCustomerField {
        /// Which field to overwrite
        field: CustomerField,
        /// The new value
        value: String,
    },

    /// Command: Choose a payment method
    SetPaymentMethod {
        /// The chosen method
        method: PaymentMethod,
    },

    /// Command: Advance to the next wizard step
    Next,

    /// Command: Walk one wizard step back
    Back,

    /// Command: Place the order and settle payment
    PlaceOrder,

    // ========== Settlement events (produced by effects) ==========
    /// Event: The gateway client library is loaded
    GatewayReady,

    /// Event: The Order API accepted a pending order
    OrderAccepted {
        /// The pending order descriptor
        order: PendingOrder,
    },

    /// Event: The shopper completed payment in the gateway widget
    GatewayApproved {
        /// The gateway callback payload
        payment: PaymentResult,
    },

    /// Event: The Order API verified the payment
    PaymentVerified {
        /// Verified gateway payment id
        payment_id: String,
    },

    /// Event: The Order API created a cash-on-delivery order
    CodOrderPlaced {
        /// The COD order reference
        order_ref: String,
    },

    /// Event: A settlement step failed
    SubmitFailed {
        /// What went wrong
        error: CheckoutError,
    },
}

/// Reducer for the checkout orchestrator
#[derive(Clone, Debug, Default)]
pub struct CheckoutReducer;

impl CheckoutReducer {
    /// Creates a new `CheckoutReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// `Next` guard: advance the wizard or report why not
    fn advance(session: &mut CheckoutSession) {
        match session.step {
            CheckoutStep::CollectingInfo => match session.customer.validate() {
                Ok(()) => {
                    session.step = CheckoutStep::ChoosingPayment;
                    session.validation_error = None;
                },
                Err(error) => session.validation_error = Some(error),
            },
            CheckoutStep::ChoosingPayment => {
                if session.payment_method.is_some() {
                    session.step = CheckoutStep::Confirming;
                    session.validation_error = None;
                } else {
                    session.validation_error =
                        Some(CheckoutError::validation("Please select a payment method"));
                }
            },
            // Forward from the last step is Place Order, not Next
            CheckoutStep::Confirming => {},
        }
    }

    /// `Back` guard: walk one step back, dismissing a failed settlement
    fn retreat(session: &mut CheckoutSession) {
        match session.step {
            CheckoutStep::CollectingInfo => {},
            CheckoutStep::ChoosingPayment => session.step = CheckoutStep::CollectingInfo,
            CheckoutStep::Confirming => session.step = CheckoutStep::ChoosingPayment,
        }
        if matches!(session.status, CheckoutStatus::Failed { .. }) {
            session.status = CheckoutStatus::InProgress;
        }
        session.validation_error = None;
    }
}

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per transition of the session machine
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::Begin { cart } => {
                if cart.is_empty() {
                    *state = CheckoutState::ExitToCart;
                } else {
                    *state = CheckoutState::Active {
                        session: CheckoutSession::new(env.clock.now()),
                        cart,
                    };
                }
                SmallVec::new()
            },

            CheckoutAction::CartChanged { cart } => {
                if let CheckoutState::Active {
                    session,
                    cart: snapshot,
                } = state
                {
                    // After success the cart was cleared by the
                    // orchestrator itself; the confirmation view stays.
                    if !session.status.is_succeeded() {
                        if cart.is_empty() {
                            *state = CheckoutState::ExitToCart;
                        } else {
                            *snapshot = cart;
                        }
                    }
                }
                SmallVec::new()
            },

            CheckoutAction::SetCustomerField { field, value } => {
                if let CheckoutState::Active { session, .. } = state {
                    // Customer info is only editable on the first step
                    if session.step == CheckoutStep::CollectingInfo
                        && !session.status.is_submitting()
                    {
                        session.customer.set(field, value);
                        session.validation_error = None;
                    }
                }
                SmallVec::new()
            },

            CheckoutAction::SetPaymentMethod { method } => {
                if let CheckoutState::Active { session, .. } = state {
                    if session.step == CheckoutStep::ChoosingPayment
                        && !session.status.is_submitting()
                    {
                        session.payment_method = Some(method);
                        session.validation_error = None;
                    }
                }
                SmallVec::new()
            },

            CheckoutAction::Next => {
                if let CheckoutState::Active { session, .. } = state {
                    if !session.status.is_submitting() && !session.status.is_succeeded() {
                        Self::advance(session);
                    }
                }
                SmallVec::new()
            },

            CheckoutAction::Back => {
                if let CheckoutState::Active { session, .. } = state {
                    if !session.status.is_submitting() && !session.status.is_succeeded() {
                        Self::retreat(session);
                    }
                }
                SmallVec::new()
            },

            CheckoutAction::PlaceOrder => {
                let CheckoutState::Active { session, cart } = state else {
                    return SmallVec::new();
                };
                // The Submitting latch: a second PlaceOrder is a no-op
                if session.step != CheckoutStep::Confirming
                    || session.status.is_submitting()
                    || session.status.is_succeeded()
                {
                    return SmallVec::new();
                }
                let Some(method) = session.payment_method else {
                    session.validation_error =
                        Some(CheckoutError::validation("Please select a payment method"));
                    return SmallVec::new();
                };

                let total = cart.total();
                if let Err(error) = env.config.limits.validate(total, method) {
                    session.validation_error = Some(error);
                    return SmallVec::new();
                }

                session.status = CheckoutStatus::Submitting;
                session.validation_error = None;
                tracing::info!(%total, ?method, "placing order");

                if method.is_online() {
                    let gateway = Arc::clone(&env.gateway);
                    smallvec![Effect::future(async move {
                        Some(match gateway.ensure_loaded().await {
                            Ok(()) => CheckoutAction::GatewayReady,
                            Err(error) => CheckoutAction::SubmitFailed { error },
                        })
                    })]
                } else {
                    let orders = Arc::clone(&env.orders);
                    let customer = session.customer.clone();
                    smallvec![Effect::future(async move {
                        Some(match orders.create_cod_order(total, &customer).await {
                            Ok(order_ref) => CheckoutAction::CodOrderPlaced { order_ref },
                            Err(error) => CheckoutAction::SubmitFailed { error },
                        })
                    })]
                }
            },

            CheckoutAction::GatewayReady => {
                let CheckoutState::Active { session, cart } = state else {
                    return SmallVec::new();
                };
                if !session.status.is_submitting() {
                    return SmallVec::new();
                }

                let orders = Arc::clone(&env.orders);
                let customer = session.customer.clone();
                let currency = env.config.currency.clone();
                let total = cart.total();
                smallvec![Effect::future(async move {
                    Some(match orders.create_order(total, &currency, &customer).await {
                        Ok(order) => CheckoutAction::OrderAccepted { order },
                        Err(error) => CheckoutAction::SubmitFailed { error },
                    })
                })]
            },

            CheckoutAction::OrderAccepted { order } => {
                let CheckoutState::Active { session, .. } = state else {
                    return SmallVec::new();
                };
                if !session.status.is_submitting() {
                    return SmallVec::new();
                }
                let Some(method) = session.payment_method else {
                    return SmallVec::new();
                };

                session.order_ref = Some(order.id.clone());
                tracing::debug!(order_id = %order.id, "pending order accepted");

                let options = GatewayOptions::new(&env.config, &order, &session.customer)
                    .for_method(method, &env.config);
                let gateway = Arc::clone(&env.gateway);
                smallvec![Effect::future(async move {
                    Some(match gateway.open(options).await {
                        Ok(payment) => CheckoutAction::GatewayApproved { payment },
                        Err(error) => CheckoutAction::SubmitFailed { error },
                    })
                })]
            },

            CheckoutAction::GatewayApproved { payment } => {
                let CheckoutState::Active { session, .. } = state else {
                    return SmallVec::new();
                };
                if !session.status.is_submitting() {
                    return SmallVec::new();
                }

                let orders = Arc::clone(&env.orders);
                smallvec![Effect::future(async move {
                    Some(match orders.verify_payment(&payment).await {
                        Ok(verification) => CheckoutAction::PaymentVerified {
                            payment_id: verification.payment_id,
                        },
                        Err(error) => CheckoutAction::SubmitFailed { error },
                    })
                })]
            },

            CheckoutAction::PaymentVerified { payment_id } => {
                let CheckoutState::Active { session, .. } = state else {
                    return SmallVec::new();
                };
                if !session.status.is_submitting() {
                    return SmallVec::new();
                }

                session.payment_id = Some(payment_id);
                session.status = CheckoutStatus::Succeeded;
                tracing::info!(order_ref = ?session.order_ref, "purchase settled");

                let cart_link = Arc::clone(&env.cart);
                smallvec![Effect::future(async move {
                    cart_link.clear().await;
                    None
                })]
            },

            CheckoutAction::CodOrderPlaced { order_ref } => {
                let CheckoutState::Active { session, .. } = state else {
                    return SmallVec::new();
                };
                if !session.status.is_submitting() {
                    return SmallVec::new();
                }

                session.order_ref = Some(order_ref);
                session.status = CheckoutStatus::Succeeded;
                tracing::info!(order_ref = ?session.order_ref, "cod order placed");

                let cart_link = Arc::clone(&env.cart);
                smallvec![Effect::future(async move {
                    cart_link.clear().await;
                    None
                })]
            },

            CheckoutAction::SubmitFailed { error } => {
                let CheckoutState::Active { session, .. } = state else {
                    return SmallVec::new();
                };
                if !session.status.is_submitting() {
                    return SmallVec::new();
                }

                tracing::warn!(%error, "settlement failed");
                // Step stays Confirming and the cart is untouched, so the
                // shopper can retry without re-entering anything.
                session.status = CheckoutStatus::Failed { error };
                SmallVec::new()
            },
        }
    }
}
