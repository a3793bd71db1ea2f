//! HTTP implementation of the Order API capability.
//!
//! Speaks the backend's JSON contract under `/api`: `create-order`,
//! `verify-payment` and `create-cod-order`. Non-success responses carry an
//! `{"error": …}` body.

use crate::error::{CheckoutError, Result};
use crate::providers::order_api::OrderApi;
use crate::types::{CustomerInfo, PaymentResult, PaymentVerification, PendingOrder};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use storefront_cart::Money;

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    amount: u64,
    currency: String,
    customer: CustomerInfo,
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    id: String,
    amount: u64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    status: String,
    payment_id: Option<String>,
    order_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CodOrderRequest {
    amount: u64,
    customer: CustomerInfo,
}

#[derive(Debug, Deserialize)]
struct CodOrderResponse {
    #[serde(rename = "orderId")]
    order_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// HTTP implementation of [`OrderApi`]
#[derive(Clone, Debug)]
pub struct HttpOrderApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderApi {
    /// Creates an Order API client against the given base URL
    /// (e.g. `http://localhost:5000/api`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn decode_error(response: reqwest::Response) -> CheckoutError {
        let message = match response.json::<ApiError>().await {
            Ok(body) => body.error,
            Err(_) => "unexpected response".to_string(),
        };
        CheckoutError::OrderRejected { message }
    }
}

impl OrderApi for HttpOrderApi {
    fn create_order(
        &self,
        amount: Money,
        currency: &str,
        customer: &CustomerInfo,
    ) -> Pin<Box<dyn Future<Output = Result<PendingOrder>> + Send>> {
        let client = self.client.clone();
        let url = self.endpoint("create-order");
        let body = CreateOrderRequest {
            amount: amount.paise(),
            currency: currency.to_string(),
            customer: customer.clone(),
        };

        Box::pin(async move {
            let response = client
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(CheckoutError::network)?;
            if !response.status().is_success() {
                return Err(Self::decode_error(response).await);
            }

            let order: CreateOrderResponse = response
                .json()
                .await
                .map_err(CheckoutError::network)?;
            tracing::debug!(order_id = %order.id, amount = order.amount, "pending order created");
            Ok(PendingOrder {
                id: order.id,
                amount: Money::from_paise(order.amount),
                currency: order.currency,
            })
        })
    }

    fn verify_payment(
        &self,
        payment: &PaymentResult,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentVerification>> + Send>> {
        let client = self.client.clone();
        let url = self.endpoint("verify-payment");
        let body = payment.clone();

        Box::pin(async move {
            let response = client
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(CheckoutError::network)?;
            if !response.status().is_success() {
                let message = match response.json::<ApiError>().await {
                    Ok(err) => err.error,
                    Err(_) => "unexpected response".to_string(),
                };
                return Err(CheckoutError::VerificationRejected { message });
            }

            let verification: VerifyResponse = response
                .json()
                .await
                .map_err(CheckoutError::network)?;
            if verification.status != "success" {
                return Err(CheckoutError::VerificationRejected {
                    message: verification.status,
                });
            }

            tracing::debug!(payment_id = %body.payment_id, "payment verified");
            Ok(PaymentVerification {
                payment_id: verification.payment_id.unwrap_or(body.payment_id),
                order_id: verification.order_id.unwrap_or(body.order_id),
            })
        })
    }

    fn create_cod_order(
        &self,
        amount: Money,
        customer: &CustomerInfo,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send>> {
        let client = self.client.clone();
        let url = self.endpoint("create-cod-order");
        let body = CodOrderRequest {
            amount: amount.paise(),
            customer: customer.clone(),
        };

        Box::pin(async move {
            let response = client
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(CheckoutError::network)?;
            if !response.status().is_success() {
                return Err(Self::decode_error(response).await);
            }

            let order: CodOrderResponse = response
                .json()
                .await
                .map_err(CheckoutError::network)?;
            tracing::debug!(order_id = %order.order_id, "cod order created");
            Ok(order.order_id)
        })
    }
}
