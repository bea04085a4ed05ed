//! Paystack gateway client.
//!
//! Two outbound operations:
//! - `initiate`: create a checkout session for an order, returning the
//!   hosted payment page URL the client is redirected to
//! - `verify`: look up a transaction by reference, used as a fallback when
//!   a webhook delivery is in doubt
//!
//! Inbound webhook deliveries are parsed into [`PaymentEvent`]; signature
//! verification lives in [`crate::signature`] because it must run on the
//! raw bytes before this module ever sees them.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// Errors
// =============================================================================

/// Gateway call failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Request(String),

    #[error("Gateway returned an error: {0}")]
    Rejected(String),

    #[error("Gateway response could not be decoded: {0}")]
    Decode(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Wire Types
// =============================================================================

/// Webhook delivery payload.
///
/// Field names follow Paystack's JSON; `orderId` in the metadata is what
/// our own `initiate` call put there.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEvent {
    pub event: String,
    pub data: PaymentEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEventData {
    pub reference: String,
    #[serde(default)]
    pub metadata: Option<PaymentMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMetadata {
    #[serde(rename = "orderId", alias = "order_id")]
    pub order_id: String,
}

impl PaymentEvent {
    /// The order this event settles, if the metadata carries one.
    pub fn order_id(&self) -> Option<&str> {
        self.data
            .metadata
            .as_ref()
            .map(|metadata| metadata.order_id.as_str())
    }
}

#[derive(Debug, Serialize)]
struct InitializeRequest<'a> {
    email: &'a str,
    /// Amount in kobo.
    amount: i64,
    reference: &'a str,
    metadata: PaymentMetadata,
    callback_url: String,
}

#[derive(Debug, Deserialize)]
struct InitializeResponse {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<InitializeData>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<VerifyData>,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    status: String,
}

// =============================================================================
// Client
// =============================================================================

/// Authenticated HTTP client for the Paystack API.
#[derive(Debug, Clone)]
pub struct PaystackClient {
    http: Client,
    base_url: String,
    secret_key: String,
    /// Portal base URL, used as the checkout callback target.
    app_url: String,
}

impl PaystackClient {
    /// Creates a new gateway client.
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>, app_url: impl Into<String>) -> Self {
        PaystackClient {
            http: Client::new(),
            base_url: base_url.into(),
            secret_key: secret_key.into(),
            app_url: app_url.into(),
        }
    }

    /// Creates a checkout session for an order.
    ///
    /// ## Arguments
    /// * `order_id` - Carried in the metadata so the webhook can find the order
    /// * `amount_kobo` - Charge amount in kobo
    /// * `email` - The payer's email (Paystack requires one)
    /// * `reference` - Our transaction reference ("PAY-{millis}")
    ///
    /// ## Returns
    /// The hosted payment page URL to redirect the client to.
    pub async fn initiate(
        &self,
        order_id: &str,
        amount_kobo: i64,
        email: &str,
        reference: &str,
    ) -> GatewayResult<String> {
        let request = InitializeRequest {
            email,
            amount: amount_kobo,
            reference,
            metadata: PaymentMetadata {
                order_id: order_id.to_string(),
            },
            callback_url: format!("{}/order/{}", self.app_url, order_id),
        };

        debug!(order_id = %order_id, amount_kobo, reference = %reference, "Initiating checkout");

        let response = self
            .http
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let body: InitializeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        if !body.status {
            return Err(GatewayError::Rejected(
                body.message
                    .unwrap_or_else(|| "initialization declined".to_string()),
            ));
        }

        body.data
            .map(|data| data.authorization_url)
            .ok_or_else(|| GatewayError::Decode("missing authorization_url".to_string()))
    }

    /// Looks up a transaction's status by reference.
    ///
    /// ## Returns
    /// * `Ok(true)` - The transaction succeeded at the gateway
    /// * `Ok(false)` - The transaction exists but did not succeed
    pub async fn verify(&self, reference: &str) -> GatewayResult<bool> {
        let response = self
            .http
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        if !body.status {
            return Err(GatewayError::Rejected(
                body.message.unwrap_or_else(|| "verify declined".to_string()),
            ));
        }

        Ok(body
            .data
            .map(|data| data.status == "success")
            .unwrap_or(false))
    }
}

/// Builds a transaction reference from the current wall clock.
///
/// Millisecond precision is enough: a single workshop does not initiate
/// two checkouts in the same millisecond.
pub fn new_reference() -> String {
    format!("PAY-{}", chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_event_parse() {
        let body = r#"{
            "event": "charge.success",
            "data": {
                "reference": "PAY-1730000000000",
                "amount": 4500000,
                "metadata": { "orderId": "o1" }
            }
        }"#;

        let event: PaymentEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.event, "charge.success");
        assert_eq!(event.data.reference, "PAY-1730000000000");
        assert_eq!(event.order_id(), Some("o1"));
    }

    #[test]
    fn test_payment_event_snake_case_metadata() {
        let body = r#"{
            "event": "charge.success",
            "data": { "reference": "PAY-2", "metadata": { "order_id": "o2" } }
        }"#;

        let event: PaymentEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.order_id(), Some("o2"));
    }

    #[test]
    fn test_payment_event_without_metadata() {
        let body = r#"{ "event": "charge.success", "data": { "reference": "PAY-3" } }"#;

        let event: PaymentEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.order_id(), None);
    }

    #[test]
    fn test_reference_format() {
        let reference = new_reference();
        assert!(reference.starts_with("PAY-"));
        assert!(reference["PAY-".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
