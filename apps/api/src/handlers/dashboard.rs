//! Dashboard metrics.
//!
//! Every figure is derived from the store at request time; nothing is
//! cached or accumulated separately, so the numbers can never drift from
//! the records they summarize.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Orders not yet delivered.
    pub active_orders: i64,
    /// Sum of settled payments, in kobo.
    pub revenue_kobo: i64,
    pub total_clients: i64,
    /// Inventory items at or below their restock threshold.
    pub low_stock_items: i64,
    /// Bookings awaiting triage.
    pub pending_bookings: i64,
}

/// GET /api/dashboard/metrics
pub async fn metrics(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardMetrics>> {
    let active_orders = state.db.orders().count_active().await?;
    let revenue_kobo = state.db.orders().revenue_kobo().await?;
    let total_clients = state.db.clients().count().await?;
    let low_stock_items = state.db.inventory().count_low_stock().await?;
    let pending_bookings = state.db.bookings().count_pending().await?;

    Ok(Json(DashboardMetrics {
        active_orders,
        revenue_kobo,
        total_clients,
        low_stock_items,
        pending_bookings,
    }))
}

#[cfg(test)]
mod tests {
    use crate::testutil::{read_json, seed_client, seed_order, test_app};
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_metrics_reflect_settlements() {
        let (app, state) = test_app().await;
        seed_client(&state, "c1").await;
        seed_order(&state, "o1", "c1", 10_000_00).await;
        seed_order(&state, "o2", "c1", 20_000_00).await;
        state
            .db
            .orders()
            .settle_payment("o1", "PAY-1")
            .await
            .unwrap();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("GET")
                    .uri("/api/dashboard/metrics")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["activeOrders"], 2);
        assert_eq!(body["revenueKobo"], 1_000_000);
        assert_eq!(body["totalClients"], 1);
        assert_eq!(body["pendingBookings"], 0);
    }
}
