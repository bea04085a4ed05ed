//! Ad-hoc email endpoint.
//!
//! Lets the dashboard resend an order-update message to a client (after a
//! correction, or when the original delivery failed) through the same
//! notifier the status workflow uses. Unlike the workflow's best-effort
//! path, this one reports delivery failure to the caller: the operator is
//! waiting for the result.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use sartor_core::validation::validate_email;
use sartor_core::{render_order_update, OrderStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to: String,
    /// Only "order_update" is supported.
    #[serde(rename = "type")]
    pub kind: String,
    pub data: OrderUpdateData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateData {
    pub client_name: String,
    pub order_id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub sent: bool,
}

/// POST /api/email
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendEmailRequest>,
) -> ApiResult<Json<SendEmailResponse>> {
    validate_email(&request.to).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if request.kind != "order_update" {
        return Err(ApiError::BadRequest(format!(
            "Unknown email type: {}",
            request.kind
        )));
    }

    let message = render_order_update(
        &request.data.client_name,
        &request.data.order_id,
        request.data.status,
        &state.config.app_url,
    );

    state
        .notifier
        .send(&request.to, &message.subject, &message.html)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    info!(to = %request.to, order_id = %request.data.order_id, "Email dispatched");
    Ok(Json(SendEmailResponse { sent: true }))
}

#[cfg(test)]
mod tests {
    use crate::testutil::{json_request, read_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_send_via_noop_notifier() {
        // Without an API key the noop notifier reports success.
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/email",
                &json!({
                    "to": "client@example.com",
                    "type": "order_update",
                    "data": { "clientName": "Adaeze", "orderId": "o1", "status": "ready" }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["sent"], true);
    }

    #[tokio::test]
    async fn test_unknown_type_is_400() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/email",
                &json!({
                    "to": "client@example.com",
                    "type": "newsletter",
                    "data": { "clientName": "A", "orderId": "o1", "status": "ready" }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_400() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/email",
                &json!({
                    "to": "nope",
                    "type": "order_update",
                    "data": { "clientName": "A", "orderId": "o1", "status": "ready" }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
