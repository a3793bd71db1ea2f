//! End-to-end checkout flows driven through real stores.
//!
//! The cart store and checkout store are wired the way an application
//! would wire them, with mock external services; each test walks the
//! wizard and settles (or fails to settle) a payment.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use storefront_cart::{CartAction, CartReducer, CartState, Money, ProductId, ProductSummary};
use storefront_checkout::mocks::{
    GatewayBehavior, MockOrderApi, MockPaymentGateway, RecordingCartLink,
};
use storefront_checkout::providers::{CartLink, StoreCartLink};
use storefront_checkout::{
    CheckoutAction, CheckoutConfig, CheckoutEnvironment, CheckoutError, CheckoutReducer,
    CheckoutState, CheckoutStatus, CheckoutStep, CustomerField, PaymentMethod,
};
use storefront_core::environment::SystemClock;
use storefront_runtime::Store;
use storefront_testing::test_clock;

type CartStore = Store<CartState, CartAction, (), CartReducer>;
type CheckoutStore = Store<CheckoutState, CheckoutAction, CheckoutEnvironment, CheckoutReducer>;

fn product(id: u64, price_rupees: u64) -> ProductSummary {
    ProductSummary {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Money::from_rupees(price_rupees),
        image_url: format!("https://cdn.example.com/p/{id}.jpg"),
    }
}

async fn cart_store_with_two_units() -> CartStore {
    let store = Store::new(CartState::new(), CartReducer::new(), ());
    store.send(CartAction::Add { product: product(1, 500) }).await;
    store.send(CartAction::Add { product: product(1, 500) }).await;
    store
}

fn checkout_store(
    orders: &MockOrderApi,
    gateway: &MockPaymentGateway,
    cart_link: Arc<dyn CartLink>,
) -> CheckoutStore {
    let env = CheckoutEnvironment::new(
        Arc::new(orders.clone()),
        Arc::new(gateway.clone()),
        cart_link,
        Arc::new(test_clock()),
        CheckoutConfig::default(),
    );
    Store::new(CheckoutState::default(), CheckoutReducer::new(), env)
}

/// Walk the wizard up to the confirmation step with valid data.
async fn walk_to_confirming(store: &CheckoutStore, cart: CartState, method: PaymentMethod) {
    store.send(CheckoutAction::Begin { cart }).await;
    for (field, value) in [
        (CustomerField::Name, "Asha Rao"),
        (CustomerField::Email, "asha@example.com"),
        (CustomerField::Phone, "9876543210"),
        (CustomerField::Address, "12 MG Road, Bengaluru"),
    ] {
        store
            .send(CheckoutAction::SetCustomerField {
                field,
                value: value.to_string(),
            })
            .await;
    }
    store.send(CheckoutAction::Next).await;
    store.send(CheckoutAction::SetPaymentMethod { method }).await;
    store.send(CheckoutAction::Next).await;

    let step = store.state(|s| s.session().map(|session| session.step)).await;
    assert_eq!(step, Some(CheckoutStep::Confirming));
}

#[tokio::test]
async fn cod_success_settles_and_clears_the_cart() {
    let cart_store = cart_store_with_two_units().await;
    let orders = MockOrderApi::new().with_cod_ref("COD123");
    let gateway = MockPaymentGateway::new(GatewayBehavior::Approve);
    let store = checkout_store(
        &orders,
        &gateway,
        Arc::new(StoreCartLink::new(cart_store.clone())),
    );

    let snapshot = cart_store.snapshot().await;
    assert_eq!(snapshot.total(), Money::from_rupees(1000));
    walk_to_confirming(&store, snapshot, PaymentMethod::Cod).await;

    store.send(CheckoutAction::PlaceOrder).await;

    let session = store.state(|s| s.session().cloned()).await.unwrap();
    assert!(session.status.is_succeeded());
    assert_eq!(session.order_ref.as_deref(), Some("COD123"));
    assert!(session.payment_id.is_none());

    // COD clears the cart on order creation; there is no online payment
    // to verify
    assert!(cart_store.state(CartState::is_empty).await);
    assert_eq!(orders.cod_calls(), 1);
    assert_eq!(orders.create_order_calls(), 0);
    assert_eq!(gateway.open_calls(), 0);
}

#[tokio::test]
async fn upi_success_runs_the_full_settlement_chain() {
    let cart_store = cart_store_with_two_units().await;
    let orders = MockOrderApi::new();
    let gateway = MockPaymentGateway::new(GatewayBehavior::Approve);
    let store = checkout_store(
        &orders,
        &gateway,
        Arc::new(StoreCartLink::new(cart_store.clone())),
    );

    walk_to_confirming(&store, cart_store.snapshot().await, PaymentMethod::Upi).await;
    store.send(CheckoutAction::PlaceOrder).await;

    let session = store.state(|s| s.session().cloned()).await.unwrap();
    assert!(session.status.is_succeeded());
    assert!(session.payment_id.is_some());
    assert!(cart_store.state(CartState::is_empty).await);

    // One pending order, one widget open, one verification - in order
    assert_eq!(orders.create_order_calls(), 1);
    assert_eq!(gateway.open_calls(), 1);
    assert_eq!(orders.verify_calls(), 1);

    // The verification carried exactly the callback the gateway produced,
    // against the pending order the session recorded
    let verified = orders.last_verify_request().unwrap();
    assert_eq!(Some(verified.order_id.clone()), session.order_ref);
    assert_eq!(Some(verified.payment_id), session.payment_id);

    // The widget was configured for the UPI collect flow with prefilled
    // contact details
    let options = gateway.last_options().unwrap();
    assert_eq!(options.method.as_deref(), Some("upi"));
    assert_eq!(options.upi.unwrap().flow, "collect");
    assert_eq!(options.prefill.contact, "9876543210");
    assert_eq!(options.amount, Money::from_rupees(1000).paise());
}

#[tokio::test]
async fn dismissing_the_widget_fails_the_attempt_and_keeps_the_cart() {
    let cart_store = cart_store_with_two_units().await;
    let orders = MockOrderApi::new();
    let gateway = MockPaymentGateway::new(GatewayBehavior::Dismiss);
    let store = checkout_store(
        &orders,
        &gateway,
        Arc::new(StoreCartLink::new(cart_store.clone())),
    );

    walk_to_confirming(&store, cart_store.snapshot().await, PaymentMethod::Upi).await;
    store.send(CheckoutAction::PlaceOrder).await;

    let session = store.state(|s| s.session().cloned()).await.unwrap();
    assert_eq!(
        session.status,
        CheckoutStatus::Failed {
            error: CheckoutError::Cancelled
        }
    );
    assert_eq!(session.step, CheckoutStep::Confirming);

    // The order was created but never verified, and the cart still holds
    // the original two units
    assert_eq!(orders.create_order_calls(), 1);
    assert_eq!(orders.verify_calls(), 0);
    assert_eq!(
        cart_store.state(|c| c.quantity_of(ProductId::new(1))).await,
        2
    );
}

#[tokio::test]
async fn retry_after_dismissal_settles_on_the_second_attempt() {
    let cart_store = cart_store_with_two_units().await;
    let orders = MockOrderApi::new();
    let gateway = MockPaymentGateway::new(GatewayBehavior::Dismiss);
    let store = checkout_store(
        &orders,
        &gateway,
        Arc::new(StoreCartLink::new(cart_store.clone())),
    );

    walk_to_confirming(&store, cart_store.snapshot().await, PaymentMethod::Card).await;
    store.send(CheckoutAction::PlaceOrder).await;
    assert!(matches!(
        store.state(|s| s.session().unwrap().status.clone()).await,
        CheckoutStatus::Failed { .. }
    ));

    // The shopper tries again without re-entering anything
    gateway.set_behavior(GatewayBehavior::Approve);
    store.send(CheckoutAction::PlaceOrder).await;

    let session = store.state(|s| s.session().cloned()).await.unwrap();
    assert!(session.status.is_succeeded());
    assert_eq!(orders.create_order_calls(), 2);
    assert_eq!(orders.verify_calls(), 1);
    assert!(cart_store.state(CartState::is_empty).await);
}

#[tokio::test]
async fn gateway_load_failure_never_contacts_the_order_api() {
    let orders = MockOrderApi::new();
    let gateway = MockPaymentGateway::new(GatewayBehavior::FailLoad);
    let cart_link = RecordingCartLink::new();
    let store = checkout_store(&orders, &gateway, Arc::new(cart_link.clone()));

    let cart_store = cart_store_with_two_units().await;
    walk_to_confirming(&store, cart_store.snapshot().await, PaymentMethod::Card).await;
    store.send(CheckoutAction::PlaceOrder).await;

    let session = store.state(|s| s.session().cloned()).await.unwrap();
    assert_eq!(
        session.status,
        CheckoutStatus::Failed {
            error: CheckoutError::GatewayUnavailable
        }
    );
    assert!(session.order_ref.is_none());
    assert_eq!(orders.create_order_calls(), 0);
    assert_eq!(cart_link.clears(), 0);
}

#[tokio::test]
async fn verification_rejection_fails_without_clearing_the_cart() {
    let orders = MockOrderApi::new().failing_verify(CheckoutError::VerificationRejected {
        message: "signature mismatch".to_string(),
    });
    let gateway = MockPaymentGateway::new(GatewayBehavior::Approve);
    let cart_link = RecordingCartLink::new();
    let store = checkout_store(&orders, &gateway, Arc::new(cart_link.clone()));

    let cart_store = cart_store_with_two_units().await;
    walk_to_confirming(&store, cart_store.snapshot().await, PaymentMethod::Card).await;
    store.send(CheckoutAction::PlaceOrder).await;

    let session = store.state(|s| s.session().cloned()).await.unwrap();
    assert!(matches!(
        session.status,
        CheckoutStatus::Failed {
            error: CheckoutError::VerificationRejected { .. }
        }
    ));
    // The payment may have been charged without confirmation; the cart is
    // deliberately kept
    assert_eq!(cart_link.clears(), 0);
    assert_eq!(orders.verify_calls(), 1);
}

#[tokio::test]
async fn checkout_with_an_empty_cart_signals_exit() {
    let orders = MockOrderApi::new();
    let gateway = MockPaymentGateway::new(GatewayBehavior::Approve);
    let store = checkout_store(&orders, &gateway, Arc::new(RecordingCartLink::new()));

    store
        .send(CheckoutAction::Begin {
            cart: CartState::new(),
        })
        .await;

    assert_eq!(store.snapshot().await, CheckoutState::ExitToCart);
}

#[tokio::test]
async fn observers_see_the_settlement_chain_in_order() {
    let cart_store = cart_store_with_two_units().await;
    let orders = MockOrderApi::new();
    let gateway = MockPaymentGateway::new(GatewayBehavior::Approve);
    let env = CheckoutEnvironment::new(
        Arc::new(orders),
        Arc::new(gateway),
        Arc::new(StoreCartLink::new(cart_store.clone())),
        Arc::new(SystemClock),
        CheckoutConfig::default(),
    );
    let store: CheckoutStore =
        Store::with_broadcast_capacity(CheckoutState::default(), CheckoutReducer::new(), env, 64);

    walk_to_confirming(&store, cart_store.snapshot().await, PaymentMethod::Upi).await;

    let mut actions = store.subscribe();
    store.send(CheckoutAction::PlaceOrder).await;

    let mut observed = Vec::new();
    while let Ok(action) = actions.try_recv() {
        observed.push(std::mem::discriminant(&action));
    }

    let expected = [
        std::mem::discriminant(&CheckoutAction::PlaceOrder),
        std::mem::discriminant(&CheckoutAction::GatewayReady),
        std::mem::discriminant(&CheckoutAction::OrderAccepted {
            order: storefront_checkout::PendingOrder {
                id: String::new(),
                amount: Money::from_paise(0),
                currency: String::new(),
            },
        }),
        std::mem::discriminant(&CheckoutAction::GatewayApproved {
            payment: storefront_checkout::PaymentResult {
                payment_id: String::new(),
                order_id: String::new(),
                signature: String::new(),
            },
        }),
        std::mem::discriminant(&CheckoutAction::PaymentVerified {
            payment_id: String::new(),
        }),
    ];
    assert_eq!(observed, expected);
}
