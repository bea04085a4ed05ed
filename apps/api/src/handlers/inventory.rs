//! Inventory handlers: stock tracking and restock alerts.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sartor_core::validation::{validate_amount_kobo, validate_name, validate_quantity};
use sartor_core::{InventoryItem, Money, DEFAULT_LOW_STOCK_THRESHOLD};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    pub quantity: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
    /// Purchase price per unit in Naira.
    #[serde(default)]
    pub price_per_unit: f64,
}

fn default_unit() -> String {
    "yards".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub supplier: Option<String>,
    pub low_stock_threshold: i64,
    pub price_per_unit_kobo: i64,
    pub low_stock: bool,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<InventoryItem> for ItemDto {
    fn from(item: InventoryItem) -> Self {
        let low_stock = item.is_low_stock();
        ItemDto {
            id: item.id,
            name: item.item_name,
            quantity: item.quantity,
            unit: item.unit,
            supplier: item.supplier,
            low_stock_threshold: item.low_stock_threshold,
            price_per_unit_kobo: item.price_per_unit_kobo,
            low_stock,
            created_at: item.created_at,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/inventory
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<ItemDto>)> {
    validate_name("name", &request.name).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validate_quantity("quantity", request.quantity)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let price_per_unit = Money::from_naira(request.price_per_unit);
    validate_amount_kobo("pricePerUnit", price_per_unit.kobo())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let item = InventoryItem {
        id: Uuid::new_v4().to_string(),
        item_name: request.name,
        quantity: request.quantity,
        unit: request.unit,
        supplier: request.supplier,
        low_stock_threshold: request
            .low_stock_threshold
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
        price_per_unit_kobo: price_per_unit.kobo(),
        created_at: Utc::now(),
    };

    state.db.inventory().insert(&item).await?;
    info!(item_id = %item.id, "Inventory item created");

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// GET /api/inventory
pub async fn list_items(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ItemDto>>> {
    let items = state.db.inventory().list().await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// GET /api/inventory/low-stock
pub async fn list_low_stock(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ItemDto>>> {
    let items = state.db.inventory().list_low_stock().await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// PATCH /api/inventory/{id}/quantity
pub async fn update_quantity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> ApiResult<Json<ItemDto>> {
    validate_quantity("quantity", request.quantity)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .db
        .inventory()
        .update_quantity(&id, request.quantity)
        .await?;

    let item = state.db.inventory().get_by_id(&id).await?;
    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use crate::testutil::{json_request, read_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_create_item_defaults() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/inventory",
                &json!({
                    "name": "Ankara print, blue",
                    "quantity": 12,
                    "pricePerUnit": 3500.0
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["unit"], "yards");
        assert_eq!(body["lowStockThreshold"], 5);
        assert_eq!(body["pricePerUnitKobo"], 350_000);
        assert_eq!(body["lowStock"], false);
    }

    #[tokio::test]
    async fn test_low_stock_listing() {
        let (app, _state) = test_app().await;

        let create = |name: &str, quantity: i64| {
            json_request(
                "POST",
                "/api/inventory",
                &json!({ "name": name, "quantity": quantity }),
            )
        };
        app.clone().oneshot(create("Plenty", 20)).await.unwrap();
        app.clone().oneshot(create("Scarce", 3)).await.unwrap();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("GET")
                    .uri("/api/inventory/low-stock")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Scarce");
        assert_eq!(body[0]["lowStock"], true);
    }

    #[tokio::test]
    async fn test_negative_quantity_is_400() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/inventory",
                &json!({ "name": "Lace", "quantity": -1 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
