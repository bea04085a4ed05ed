//! Shared helpers for handler tests.
//!
//! Builds the full router against an in-memory database so tests exercise
//! the real route table, extractors and error mapping.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, Utc};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use sartor_core::{Client, Order, OrderStatus, PaymentStatus};
use sartor_db::{Database, DbConfig};
use sha2::Sha512;

use crate::config::ApiConfig;
use crate::notify::{Notifier, NotifyError};
use crate::routes::router;
use crate::state::AppState;

pub const TEST_SECRET: &str = "sk_test_secret";

fn test_config() -> ApiConfig {
    ApiConfig {
        http_port: 0,
        database_path: ":memory:".to_string(),
        paystack_secret_key: TEST_SECRET.to_string(),
        // Points nowhere; tests never make outbound gateway calls.
        paystack_base_url: "http://127.0.0.1:0".to_string(),
        app_url: "http://localhost:3000".to_string(),
        resend_api_key: None,
        email_from: "Sartor <orders@sartor.example.com>".to_string(),
        huggingface_api_token: None,
        media_root: std::env::temp_dir()
            .join(format!("sartor-test-{}", uuid::Uuid::new_v4()))
            .display()
            .to_string(),
    }
}

/// Builds the router plus a handle on its state for direct store access.
pub async fn test_app() -> (Router, Arc<AppState>) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = Arc::new(AppState::new(db, test_config()));
    (router(state.clone()), state)
}

/// Same as [`test_app`], with the notifier swapped out.
pub async fn test_app_with_notifier(notifier: Arc<dyn Notifier>) -> (Router, Arc<AppState>) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let mut state = AppState::new(db, test_config());
    state.notifier = notifier;
    let state = Arc::new(state);
    (router(state.clone()), state)
}

/// Notifier whose provider is always down.
pub struct FailingNotifier;

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _to: &str, _subject: &str, _html: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Request("connection refused".to_string()))
    }
}

pub async fn seed_client(state: &AppState, id: &str) {
    let client = Client {
        id: id.to_string(),
        name: "Adaeze Obi".to_string(),
        phone: "08012345678".to_string(),
        email: Some("adaeze@example.com".to_string()),
        measurements: Default::default(),
        created_at: Utc::now(),
    };
    state.db.clients().insert(&client).await.unwrap();
}

pub async fn seed_order(state: &AppState, id: &str, client_id: &str, price_kobo: i64) {
    let now = Utc::now();
    let order = Order {
        id: id.to_string(),
        client_id: client_id.to_string(),
        description: "Agbada, royal blue".to_string(),
        notes: None,
        price_kobo,
        paid_kobo: 0,
        deadline: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        payment_reference: None,
        created_at: now,
        updated_at: now,
    };
    state.db.orders().insert(&order).await.unwrap();
}

/// Builds a webhook POST signed the way Paystack signs deliveries.
pub fn signed_webhook(body: &str) -> Request<Body> {
    let mut mac = Hmac::<Sha512>::new_from_slice(TEST_SECRET.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/paystack/webhook")
        .header("content-type", "application/json")
        .header("x-paystack-signature", signature)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a JSON request.
pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collects a response body as JSON.
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
