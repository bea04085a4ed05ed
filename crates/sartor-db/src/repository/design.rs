//! # Design Repository
//!
//! Persistence for AI-generated design mockups kept in the portfolio.

use sartor_core::Design;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for design records.
#[derive(Debug, Clone)]
pub struct DesignRepository {
    pool: SqlitePool,
}

impl DesignRepository {
    /// Creates a new design repository.
    pub fn new(pool: SqlitePool) -> Self {
        DesignRepository { pool }
    }

    /// Inserts a new design.
    pub async fn insert(&self, design: &Design) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO designs (id, prompt, image_url, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&design.id)
        .bind(&design.prompt)
        .bind(&design.image_url)
        .bind(design.created_at)
        .execute(&self.pool)
        .await?;

        debug!(design_id = %design.id, "Design inserted");
        Ok(())
    }

    /// Fetches a design by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Design> {
        let design: Option<Design> = sqlx::query_as(
            "SELECT id, prompt, image_url, created_at FROM designs WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        design.ok_or_else(|| DbError::not_found("design", id))
    }

    /// Lists all designs, newest first.
    pub async fn list(&self) -> DbResult<Vec<Design>> {
        let designs = sqlx::query_as(
            "SELECT id, prompt, image_url, created_at FROM designs ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(designs)
    }
}
