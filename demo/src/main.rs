//! Storefront demo.
//!
//! Wires the catalog, cart and checkout stores together with mock
//! external services and walks two purchases end to end: a UPI payment
//! settled through the (mock) gateway widget, and a cash-on-delivery
//! order. The same wiring with `HttpCatalog`/`HttpOrderApi` and a real
//! gateway bridge is what a production shell would do.
//!
//! Run with:
//! ```bash
//! cargo run --bin storefront-demo
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use storefront_cart::{CartAction, CartReducer, CartState, Money, ProductId};
use storefront_catalog::mocks::InMemoryCatalog;
use storefront_catalog::{CatalogAction, CatalogEnvironment, CatalogReducer, CatalogState, Product};
use storefront_checkout::mocks::{GatewayBehavior, MockOrderApi, MockPaymentGateway};
use storefront_checkout::providers::StoreCartLink;
use storefront_checkout::{
    CheckoutAction, CheckoutConfig, CheckoutEnvironment, CheckoutReducer, CheckoutState,
    CustomerField, PaymentMethod,
};
use storefront_core::environment::SystemClock;
use storefront_runtime::Store;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn sample_products() -> Vec<Product> {
    let mut phone_specs = HashMap::new();
    phone_specs.insert("Display".to_string(), "6.1\" OLED".to_string());
    phone_specs.insert("Storage".to_string(), "128 GB".to_string());

    vec![
        Product {
            id: ProductId::new(1),
            name: "Smartphone X1".to_string(),
            description: "Flagship smartphone with OLED display".to_string(),
            price: Money::from_rupees(29_999),
            stock: 25,
            image_url: "https://cdn.example.com/p/1.jpg".to_string(),
            category: "Mobiles".to_string(),
            specifications: phone_specs,
        },
        Product {
            id: ProductId::new(2),
            name: "Wireless Headphones".to_string(),
            description: "Over-ear, noise cancelling".to_string(),
            price: Money::from_rupees(2_999),
            stock: 60,
            image_url: "https://cdn.example.com/p/2.jpg".to_string(),
            category: "Audio".to_string(),
            specifications: HashMap::new(),
        },
    ]
}

async fn fill_customer_form(
    store: &Store<CheckoutState, CheckoutAction, CheckoutEnvironment, CheckoutReducer>,
) {
    for (field, value) in [
        (CustomerField::Name, "Asha Rao"),
        (CustomerField::Email, "asha@example.com"),
        (CustomerField::Phone, "9876543210"),
        (CustomerField::Address, "12 MG Road, Bengaluru 560001"),
    ] {
        store
            .send(CheckoutAction::SetCustomerField {
                field,
                value: value.to_string(),
            })
            .await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("=== Storefront demo ===");

    // Catalog: browse the product list
    let catalog_store = Store::new(
        CatalogState::new(),
        CatalogReducer::new(),
        CatalogEnvironment::new(Arc::new(InMemoryCatalog::with_products(sample_products()))),
    );
    catalog_store
        .send(CatalogAction::LoadProducts { category: None })
        .await;
    let products = catalog_store.state(|s| s.products.clone()).await;
    for product in &products {
        info!(id = %product.id, price = %product.price, "{}", product.name);
    }

    // Cart: two headphones, one phone
    let cart_store = Store::new(CartState::new(), CartReducer::new(), ());
    cart_store
        .send(CartAction::Add {
            product: products[1].summary(),
        })
        .await;
    cart_store
        .send(CartAction::Add {
            product: products[1].summary(),
        })
        .await;
    cart_store
        .send(CartAction::Add {
            product: products[0].summary(),
        })
        .await;
    info!(total = %cart_store.state(CartState::total).await, "cart filled");

    // Checkout services: mock gateway and order API; a real shell would
    // wire HttpOrderApi and a bridge to the hosted widget here
    let orders = MockOrderApi::new().with_cod_ref("COD-7001");
    let gateway = MockPaymentGateway::new(GatewayBehavior::Approve);
    let env = CheckoutEnvironment::new(
        Arc::new(orders),
        Arc::new(gateway),
        Arc::new(StoreCartLink::new(cart_store.clone())),
        Arc::new(SystemClock),
        CheckoutConfig::new("rzp_test_demo").with_shop_name("Demo Electronics"),
    );
    let checkout_store = Store::new(CheckoutState::default(), CheckoutReducer::new(), env);

    // UPI purchase
    checkout_store
        .send(CheckoutAction::Begin {
            cart: cart_store.snapshot().await,
        })
        .await;
    fill_customer_form(&checkout_store).await;
    checkout_store.send(CheckoutAction::Next).await;
    checkout_store
        .send(CheckoutAction::SetPaymentMethod {
            method: PaymentMethod::Upi,
        })
        .await;
    checkout_store.send(CheckoutAction::Next).await;
    checkout_store.send(CheckoutAction::PlaceOrder).await;

    if let Some(session) = checkout_store.state(|s| s.session().cloned()).await {
        info!(
            status = ?session.status,
            order_ref = ?session.order_ref,
            payment_id = ?session.payment_id,
            "upi purchase finished"
        );
    }
    info!(
        cart_empty = cart_store.state(CartState::is_empty).await,
        "cart after settlement"
    );

    // COD purchase: refill the cart and settle without the gateway
    cart_store
        .send(CartAction::Add {
            product: products[1].summary(),
        })
        .await;
    checkout_store
        .send(CheckoutAction::Begin {
            cart: cart_store.snapshot().await,
        })
        .await;
    fill_customer_form(&checkout_store).await;
    checkout_store.send(CheckoutAction::Next).await;
    checkout_store
        .send(CheckoutAction::SetPaymentMethod {
            method: PaymentMethod::Cod,
        })
        .await;
    checkout_store.send(CheckoutAction::Next).await;
    checkout_store.send(CheckoutAction::PlaceOrder).await;

    if let Some(session) = checkout_store.state(|s| s.session().cloned()).await {
        info!(
            status = ?session.status,
            order_ref = ?session.order_ref,
            "cod purchase finished"
        );
    }

    Ok(())
}
