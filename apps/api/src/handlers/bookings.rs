//! Booking handlers.
//!
//! POST is reachable from the public site's consultation form; the list
//! and status endpoints back the dashboard's triage view.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sartor_core::validation::{validate_name, validate_phone};
use sartor_core::{Booking, BookingStatus};
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
pub struct CreateBookingRequest {
    pub customer_name: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub material_photo_url: Option<String>,
    #[serde(default)]
    pub sample_design_url: Option<String>,
    #[serde(default)]
    pub ai_prompt: Option<String>,
    #[serde(default)]
    pub ai_generated_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub customer_name: String,
    pub whatsapp_number: String,
    pub material_photo_url: Option<String>,
    pub sample_design_url: Option<String>,
    pub ai_prompt: Option<String>,
    pub ai_generated_url: Option<String>,
    pub status: BookingStatus,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        BookingDto {
            id: booking.id,
            customer_name: booking.customer_name,
            whatsapp_number: booking.whatsapp_number,
            material_photo_url: booking.material_photo_url,
            sample_design_url: booking.sample_design_url,
            ai_prompt: booking.ai_prompt,
            ai_generated_url: booking.ai_generated_url,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingDto>)> {
    validate_name("customerName", &request.customer_name)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validate_phone("whatsappNumber", &request.whatsapp_number)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        customer_name: request.customer_name,
        whatsapp_number: request.whatsapp_number,
        material_photo_url: request.material_photo_url,
        sample_design_url: request.sample_design_url,
        ai_prompt: request.ai_prompt,
        ai_generated_url: request.ai_generated_url,
        status: BookingStatus::Pending,
        created_at: Utc::now(),
    };

    state.db.bookings().insert(&booking).await?;
    info!(booking_id = %booking.id, "Booking created");

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// GET /api/bookings
pub async fn list_bookings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<BookingDto>>> {
    let bookings = state.db.bookings().list().await?;
    Ok(Json(bookings.into_iter().map(BookingDto::from).collect()))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> ApiResult<Json<BookingDto>> {
    state.db.bookings().update_status(&id, request.status).await?;

    let booking = state.db.bookings().get_by_id(&id).await?;
    Ok(Json(booking.into()))
}

#[cfg(test)]
mod tests {
    use crate::testutil::{json_request, read_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_public_form_creates_pending_booking() {
        let (app, _state) = test_app().await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/bookings",
                &json!({
                    "customerName": "Tunde Bakare",
                    "whatsappNumber": "08098765432",
                    "aiPrompt": "senator style, navy"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["status"], "pending");
        assert_eq!(body["aiPrompt"], "senator style, navy");
    }

    #[tokio::test]
    async fn test_triage_to_contacted() {
        let (app, state) = test_app().await;

        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/bookings",
                &json!({ "customerName": "Tunde", "whatsappNumber": "08098765432" }),
            ))
            .await
            .unwrap();
        let body = read_json(created).await;
        let id = body["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/api/bookings/{id}/status"),
                &json!({ "status": "contacted" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let booking = state.db.bookings().get_by_id(&id).await.unwrap();
        assert_eq!(booking.status, sartor_core::BookingStatus::Contacted);
    }
}
