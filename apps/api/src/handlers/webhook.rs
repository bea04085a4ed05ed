//! Paystack webhook handler: signature verification plus payment
//! reconciliation.
//!
//! ## Reconciliation Contract
//! ```text
//! raw body ──► verify HMAC ──► parse JSON ──► charge.success? ──► settle
//!                  │                               │                 │
//!                  ▼ no                            ▼ no              ▼
//!                401                              200 ack        200 ack
//! ```
//!
//! Everything after a valid signature is acknowledged with 200 so the
//! gateway stops redelivering: unknown event types, deliveries without an
//! order id, deliveries for orders that no longer exist. The exceptions
//! are storage failures and timeouts, which answer 500 precisely so the
//! gateway DOES redeliver once the store is healthy again. Settlement is
//! idempotent, so redelivery is always safe.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sartor_db::SettlementOutcome;
use serde_json::json;
use tracing::{info, warn};

use crate::signature::{verify_signature, SIGNATURE_HEADER};
use crate::state::AppState;

/// Upper bound on a single settlement attempt. Past this we'd rather have
/// the gateway redeliver than hold its delivery worker.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// POST /api/paystack/webhook
pub async fn paystack_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Signature check runs on the raw bytes, before any parsing.
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !verify_signature(&state.config.paystack_secret_key, &body, signature) {
        warn!("Webhook rejected: invalid signature");
        // Fixed plain-text body; the gateway is the only caller and gets
        // nothing to probe with.
        return (StatusCode::UNAUTHORIZED, "Invalid signature").into_response();
    }

    let event: crate::gateway::PaymentEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            // Signed but unparseable. Redelivery would fail identically,
            // so acknowledge.
            warn!(error = %e, "Webhook body did not parse, acknowledging");
            return ack();
        }
    };

    if event.event != "charge.success" {
        info!(event = %event.event, "Ignoring non-settlement event");
        return ack();
    }

    let Some(order_id) = event.order_id().map(str::to_string) else {
        warn!(reference = %event.data.reference, "charge.success without an order id");
        return ack();
    };

    let reference = event.data.reference.clone();

    let settled = tokio::time::timeout(
        SETTLE_TIMEOUT,
        state.db.orders().settle_payment(&order_id, &reference),
    )
    .await;

    match settled {
        Ok(Ok(SettlementOutcome::Applied(order))) => {
            info!(
                order_id = %order.id,
                reference = %reference,
                paid_kobo = order.paid_kobo,
                "Payment settled"
            );
            ack()
        }
        Ok(Ok(SettlementOutcome::Duplicate(_))) => {
            info!(order_id = %order_id, reference = %reference, "Duplicate delivery, no change");
            ack()
        }
        Ok(Ok(SettlementOutcome::Conflict {
            existing_reference, ..
        })) => {
            // Operator attention needed; the stored settlement was kept.
            warn!(
                order_id = %order_id,
                incoming = %reference,
                existing = ?existing_reference,
                "Settlement conflict: order already paid with a different reference"
            );
            ack()
        }
        Ok(Ok(SettlementOutcome::NotFound { .. })) => {
            warn!(order_id = %order_id, reference = %reference, "Settlement for unknown order");
            ack()
        }
        Ok(Err(e)) => {
            warn!(order_id = %order_id, error = %e, "Settlement failed, requesting redelivery");
            server_error()
        }
        Err(_) => {
            warn!(order_id = %order_id, "Settlement timed out, requesting redelivery");
            server_error()
        }
    }
}

fn ack() -> Response {
    (StatusCode::OK, Json(json!({ "received": true }))).into_response()
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Settlement failed" })),
    )
        .into_response()
}
