//! # Client Repository
//!
//! Persistence for workshop clients and their measurements.
//!
//! ## Measurements Storage
//! Measurements are a free-form name -> value map (chest, waist, hips, ...).
//! They are stored as a JSON object in a TEXT column rather than a child
//! table: the map is always read and written whole, and the set of fields
//! varies per garment type.

use sartor_core::Client;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw row shape; `measurements` is the JSON-encoded map.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: String,
    name: String,
    phone: String,
    email: Option<String>,
    measurements: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ClientRow {
    fn into_client(self) -> DbResult<Client> {
        let measurements: BTreeMap<String, String> = serde_json::from_str(&self.measurements)
            .map_err(|e| DbError::DecodeFailed {
                entity: "client".to_string(),
                id: self.id.clone(),
                message: e.to_string(),
            })?;

        Ok(Client {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            measurements,
            created_at: self.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for client records.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new client repository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Inserts a new client.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - A client with this id already exists
    pub async fn insert(&self, client: &Client) -> DbResult<()> {
        let measurements = serde_json::to_string(&client.measurements)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO clients (id, name, phone, email, measurements, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.phone)
        .bind(&client.email)
        .bind(&measurements)
        .bind(client.created_at)
        .execute(&self.pool)
        .await?;

        debug!(client_id = %client.id, "Client inserted");
        Ok(())
    }

    /// Fetches a client by id.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No client with this id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Client> {
        let row: Option<ClientRow> = sqlx::query_as(
            r#"
            SELECT id, name, phone, email, measurements, created_at
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.into_client(),
            None => Err(DbError::not_found("client", id)),
        }
    }

    /// Lists all clients, newest first.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let rows: Vec<ClientRow> = sqlx::query_as(
            r#"
            SELECT id, name, phone, email, measurements, created_at
            FROM clients
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ClientRow::into_client).collect()
    }

    /// Replaces a client's measurements map.
    pub async fn update_measurements(
        &self,
        id: &str,
        measurements: &BTreeMap<String, String>,
    ) -> DbResult<()> {
        let encoded =
            serde_json::to_string(measurements).map_err(|e| DbError::Internal(e.to_string()))?;

        let result = sqlx::query("UPDATE clients SET measurements = ?2 WHERE id = ?1")
            .bind(id)
            .bind(&encoded)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("client", id));
        }

        Ok(())
    }

    /// Counts all clients.
    pub async fn count(&self) -> DbResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
