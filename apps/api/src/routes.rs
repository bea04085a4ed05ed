//! HTTP route table.

use std::sync::Arc;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Builds the application router.
///
/// All state is injected here so tests can drive the router in-process
/// against an in-memory database.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Liveness
        .route("/health", get(handlers::health::health))
        // Payment gateway
        .route("/api/paystack/webhook", post(handlers::webhook::paystack_webhook))
        .route("/api/paystack/initiate", post(handlers::payments::initiate_payment))
        .route("/api/paystack/verify", post(handlers::payments::verify_payment))
        // Clients
        .route(
            "/api/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route("/api/clients/{id}", get(handlers::clients::get_client))
        .route(
            "/api/clients/{id}/measurements",
            put(handlers::clients::update_measurements),
        )
        // Orders
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/api/orders/{id}", get(handlers::orders::get_order))
        .route("/api/orders/{id}/status", patch(handlers::orders::update_order_status))
        // Inventory
        .route(
            "/api/inventory",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route("/api/inventory/low-stock", get(handlers::inventory::list_low_stock))
        .route(
            "/api/inventory/{id}/quantity",
            patch(handlers::inventory::update_quantity),
        )
        // Bookings (POST is the public site's consultation form)
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/api/bookings/{id}/status",
            patch(handlers::bookings::update_booking_status),
        )
        // Designs
        .route("/api/designs", get(handlers::designs::list_designs))
        .route("/api/ai/generate", post(handlers::designs::generate_design))
        // Email
        .route("/api/email", post(handlers::email::send_email))
        // Dashboard
        .route("/api/dashboard/metrics", get(handlers::dashboard::metrics))
        .with_state(state)
}
