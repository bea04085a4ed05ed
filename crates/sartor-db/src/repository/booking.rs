//! # Booking Repository
//!
//! Persistence for consultation requests submitted through the public site.

use sartor_core::{Booking, BookingStatus};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const BOOKING_COLUMNS: &str = "id, customer_name, whatsapp_number, material_photo_url, \
     sample_design_url, ai_prompt, ai_generated_url, status, created_at";

/// Repository for booking records.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new booking repository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Inserts a new booking.
    pub async fn insert(&self, booking: &Booking) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, customer_name, whatsapp_number, material_photo_url,
                sample_design_url, ai_prompt, ai_generated_url, status, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.customer_name)
        .bind(&booking.whatsapp_number)
        .bind(&booking.material_photo_url)
        .bind(&booking.sample_design_url)
        .bind(&booking.ai_prompt)
        .bind(&booking.ai_generated_url)
        .bind(booking.status)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        debug!(booking_id = %booking.id, "Booking inserted");
        Ok(())
    }

    /// Fetches a booking by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Booking> {
        let booking: Option<Booking> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        booking.ok_or_else(|| DbError::not_found("booking", id))
    }

    /// Lists all bookings, newest first.
    pub async fn list(&self) -> DbResult<Vec<Booking>> {
        let bookings = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Updates a booking's triage status.
    pub async fn update_status(&self, id: &str, status: BookingStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE bookings SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("booking", id));
        }

        Ok(())
    }

    /// Counts bookings awaiting triage.
    pub async fn count_pending(&self) -> DbResult<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
