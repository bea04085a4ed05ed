//! Order handlers: CRUD plus the production status workflow.
//!
//! ## Status Updates
//! Any of the four production statuses may be selected at any time,
//! including moving backward for rework. The status write commits first;
//! the client notification that follows is best effort, and its failure
//! comes back as a `warning` field on an otherwise successful response.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use sartor_core::validation::{validate_amount_kobo, validate_description};
use sartor_core::{
    classify_transition, render_order_update, Money, Order, OrderStatus, PaymentStatus,
    TransitionKind,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: String,
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Agreed price in Naira.
    pub price: f64,
    /// Target completion date, ISO "YYYY-MM-DD".
    pub deadline: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    #[serde(flatten)]
    pub order: OrderDto,
    /// Set when the status change committed but the client notification
    /// did not go out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub client_id: String,
    pub description: String,
    pub notes: Option<String>,
    pub price_kobo: i64,
    pub paid_kobo: i64,
    pub outstanding_kobo: i64,
    pub deadline: NaiveDate,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        let outstanding_kobo = order.outstanding().kobo();
        OrderDto {
            id: order.id,
            client_id: order.client_id,
            description: order.description,
            notes: order.notes,
            price_kobo: order.price_kobo,
            paid_kobo: order.paid_kobo,
            outstanding_kobo,
            deadline: order.deadline,
            status: order.status,
            payment_status: order.payment_status,
            payment_reference: order.payment_reference,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/orders
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderDto>)> {
    validate_description(&request.description).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let price = Money::from_naira(request.price);
    validate_amount_kobo("price", price.kobo()).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Fails with 404 if the client does not exist.
    state.db.clients().get_by_id(&request.client_id).await?;

    let now = Utc::now();
    let order = Order {
        id: Uuid::new_v4().to_string(),
        client_id: request.client_id,
        description: request.description,
        notes: request.notes,
        price_kobo: price.kobo(),
        paid_kobo: 0,
        deadline: request.deadline,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        payment_reference: None,
        created_at: now,
        updated_at: now,
    };

    state.db.orders().insert(&order).await?;
    info!(order_id = %order.id, client_id = %order.client_id, "Order created");

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /api/orders?status=ready
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> ApiResult<Json<Vec<OrderDto>>> {
    let orders = state.db.orders().list(query.status).await?;
    Ok(Json(orders.into_iter().map(OrderDto::from).collect()))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderDto>> {
    let order = state.db.orders().get_by_id(&id).await?;
    Ok(Json(order.into()))
}

/// PATCH /api/orders/{id}/status
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<UpdateStatusResponse>> {
    let previous = state.db.orders().update_status(&id, request.status).await?;

    let kind = classify_transition(previous.status, request.status);
    match kind {
        TransitionKind::Backward => {
            // Legal (rework happens), but worth a trace.
            info!(
                order_id = %id,
                from = %previous.status,
                to = %request.status,
                "Order moved backward in the workflow"
            );
        }
        kind => {
            info!(order_id = %id, from = %previous.status, to = %request.status, ?kind, "Order status updated");
        }
    }

    let order = state.db.orders().get_by_id(&id).await?;

    // The status change is already committed; whatever happens to the
    // notification from here is a warning at most. Re-selecting the
    // current status is a no-op and nothing to announce.
    let warning = match kind {
        TransitionKind::Unchanged => None,
        _ => notify_client(&state, &order).await,
    };

    Ok(Json(UpdateStatusResponse {
        order: order.into(),
        warning,
    }))
}

/// Attempts the status-change email. Returns a warning message instead of
/// an error on any failure.
async fn notify_client(state: &AppState, order: &Order) -> Option<String> {
    let client = match state.db.clients().get_by_id(&order.client_id).await {
        Ok(client) => client,
        Err(e) => {
            warn!(order_id = %order.id, error = %e, "Notification skipped: client lookup failed");
            return Some("Status updated, but the client could not be notified".to_string());
        }
    };

    let Some(email) = client.email else {
        info!(order_id = %order.id, client_id = %client.id, "Notification skipped: client has no email");
        return Some("Status updated; client has no email on file".to_string());
    };

    let message = render_order_update(&client.name, &order.id, order.status, &state.config.app_url);

    match state
        .notifier
        .send(&email, &message.subject, &message.html)
        .await
    {
        Ok(()) => None,
        Err(e) => {
            warn!(order_id = %order.id, error = %e, "Notification delivery failed");
            Some("Status updated, but the notification email failed to send".to_string())
        }
    }
}
