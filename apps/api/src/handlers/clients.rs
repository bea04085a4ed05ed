//! Client handlers: registration, lookup, measurement sheets.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sartor_core::validation::{
    validate_email, validate_measurements, validate_name, validate_phone,
};
use sartor_core::Client;
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
pub struct CreateClientRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Measurement sheet, name to value. Names come from the intake
    /// vocabulary (`MEASUREMENT_FIELDS`).
    #[serde(default)]
    pub measurements: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub measurements: BTreeMap<String, String>,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        ClientDto {
            id: client.id,
            name: client.name,
            phone: client.phone,
            email: client.email,
            measurements: client.measurements,
            created_at: client.created_at,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/clients
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateClientRequest>,
) -> ApiResult<(StatusCode, Json<ClientDto>)> {
    validate_name("name", &request.name).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validate_phone("phone", &request.phone).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if let Some(email) = &request.email {
        validate_email(email).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    }
    validate_measurements(&request.measurements)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let client = Client {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        phone: request.phone,
        email: request.email,
        measurements: request.measurements,
        created_at: Utc::now(),
    };

    state.db.clients().insert(&client).await?;
    info!(client_id = %client.id, "Client created");

    Ok((StatusCode::CREATED, Json(client.into())))
}

/// GET /api/clients
pub async fn list_clients(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ClientDto>>> {
    let clients = state.db.clients().list().await?;
    Ok(Json(clients.into_iter().map(ClientDto::from).collect()))
}

/// Client detail: the record plus their order history.
#[derive(Debug, Serialize)]
pub struct ClientDetailDto {
    #[serde(flatten)]
    pub client: ClientDto,
    pub orders: Vec<crate::handlers::orders::OrderDto>,
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ClientDetailDto>> {
    let client = state.db.clients().get_by_id(&id).await?;
    let orders = state.db.orders().list_by_client(&id).await?;

    Ok(Json(ClientDetailDto {
        client: client.into(),
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

/// PUT /api/clients/{id}/measurements
pub async fn update_measurements(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(measurements): Json<BTreeMap<String, String>>,
) -> ApiResult<Json<ClientDto>> {
    validate_measurements(&measurements).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .db
        .clients()
        .update_measurements(&id, &measurements)
        .await?;

    let client = state.db.clients().get_by_id(&id).await?;
    Ok(Json(client.into()))
}
