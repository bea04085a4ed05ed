//! Payment initiation and manual verification handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use sartor_core::Money;
use sartor_db::SettlementOutcome;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::gateway::new_reference;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateRequest {
    pub order_id: String,
    /// Amount in Naira, as entered by the operator. Converted to kobo at
    /// this boundary and integer everywhere past it.
    pub amount: f64,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct InitiateResponse {
    /// Hosted checkout page URL.
    pub url: String,
    pub reference: String,
}

/// POST /api/paystack/initiate
pub async fn initiate_payment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InitiateRequest>,
) -> ApiResult<Json<InitiateResponse>> {
    sartor_core::validation::validate_email(&request.email)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if request.amount <= 0.0 {
        return Err(ApiError::BadRequest("Amount must be positive".to_string()));
    }

    // The order must exist before we send the client to checkout; a typo'd
    // id would otherwise produce a charge.success no one can reconcile.
    let order = state.db.orders().get_by_id(&request.order_id).await?;

    let amount = Money::from_naira(request.amount);
    let reference = new_reference();

    let url = state
        .paystack
        .initiate(&order.id, amount.kobo(), &request.email, &reference)
        .await?;

    info!(
        order_id = %order.id,
        amount_kobo = amount.kobo(),
        reference = %reference,
        "Checkout initiated"
    );

    Ok(Json(InitiateResponse { url, reference }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub order_id: String,
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub settled: bool,
    pub order: crate::handlers::orders::OrderDto,
}

/// POST /api/paystack/verify
///
/// Manual reconciliation fallback for when a webhook delivery never
/// arrived: the operator supplies the reference, we confirm it with the
/// gateway and run the same settlement the webhook would have.
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerifyRequest>,
) -> ApiResult<Json<VerifyResponse>> {
    let succeeded = state.paystack.verify(&request.reference).await?;
    if !succeeded {
        return Err(ApiError::BadRequest(format!(
            "Transaction {} did not succeed at the gateway",
            request.reference
        )));
    }

    let outcome = state
        .db
        .orders()
        .settle_payment(&request.order_id, &request.reference)
        .await?;

    match outcome {
        SettlementOutcome::Applied(order) => {
            info!(order_id = %order.id, reference = %request.reference, "Payment settled manually");
            Ok(Json(VerifyResponse {
                settled: true,
                order: order.into(),
            }))
        }
        SettlementOutcome::Duplicate(order) => Ok(Json(VerifyResponse {
            settled: false,
            order: order.into(),
        })),
        SettlementOutcome::Conflict {
            existing_reference, ..
        } => Err(ApiError::BadRequest(format!(
            "Order is already paid with reference {}",
            existing_reference.unwrap_or_default()
        ))),
        SettlementOutcome::NotFound { order_id } => {
            Err(ApiError::NotFound(format!("Order not found: {order_id}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::{json_request, read_json, seed_client, seed_order, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_initiate_unknown_order_is_404() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/paystack/initiate",
                &json!({ "orderId": "ghost", "amount": 450.0, "email": "ada@example.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_initiate_rejects_nonpositive_amount() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/paystack/initiate",
                &json!({ "orderId": "o1", "amount": 0.0, "email": "ada@example.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_initiate_gateway_failure_is_500_with_message() {
        // The test gateway URL points nowhere, so the outbound call fails.
        let (app, state) = test_app().await;
        seed_client(&state, "c1").await;
        seed_order(&state, "o1", "c1", 45_000_00).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/paystack/initiate",
                &json!({ "orderId": "o1", "amount": 450.0, "email": "ada@example.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["code"], "GATEWAY_ERROR");
        assert!(!body["error"].as_str().unwrap().is_empty());

        // Nothing was settled by a failed initiation.
        let order = state.db.orders().get_by_id("o1").await.unwrap();
        assert_eq!(order.paid_kobo, 0);
    }
}
