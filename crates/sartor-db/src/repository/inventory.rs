//! # Inventory Repository
//!
//! Persistence for fabric and material stock.

use sartor_core::InventoryItem;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const ITEM_COLUMNS: &str = "id, item_name, quantity, unit, supplier, \
     low_stock_threshold, price_per_unit_kobo, created_at";

/// Repository for inventory items.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Inserts a new inventory item.
    pub async fn insert(&self, item: &InventoryItem) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory (
                id, item_name, quantity, unit, supplier,
                low_stock_threshold, price_per_unit_kobo, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.item_name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(&item.supplier)
        .bind(item.low_stock_threshold)
        .bind(item.price_per_unit_kobo)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        debug!(item_id = %item.id, "Inventory item inserted");
        Ok(())
    }

    /// Fetches an item by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<InventoryItem> {
        let item: Option<InventoryItem> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or_else(|| DbError::not_found("inventory item", id))
    }

    /// Lists all items, alphabetically by name.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory ORDER BY item_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists items at or below their restock threshold.
    pub async fn list_low_stock(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory \
             WHERE quantity <= low_stock_threshold ORDER BY item_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Sets an item's quantity on hand.
    ///
    /// ## Errors
    /// * `DbError::CheckViolation` - Negative quantity
    /// * `DbError::NotFound` - No item with this id
    pub async fn update_quantity(&self, id: &str, quantity: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE inventory SET quantity = ?2 WHERE id = ?1")
            .bind(id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("inventory item", id));
        }

        Ok(())
    }

    /// Counts items at or below their restock threshold.
    pub async fn count_low_stock(&self) -> DbResult<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM inventory WHERE quantity <= low_stock_threshold",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn sample_item(id: &str, quantity: i64, threshold: i64) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            item_name: format!("Ankara fabric {id}"),
            quantity,
            unit: "yards".to_string(),
            supplier: Some("Balogun market".to_string()),
            low_stock_threshold: threshold,
            price_per_unit_kobo: 3_500_00,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();

        repo.insert(&sample_item("i1", 12, 5)).await.unwrap();
        repo.insert(&sample_item("i2", 3, 5)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_low_stock_detection() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();

        repo.insert(&sample_item("plenty", 12, 5)).await.unwrap();
        repo.insert(&sample_item("low", 3, 5)).await.unwrap();
        // At-threshold counts as low.
        repo.insert(&sample_item("edge", 5, 5)).await.unwrap();

        let low = repo.list_low_stock().await.unwrap();
        assert_eq!(low.len(), 2);
        assert!(low.iter().all(|item| item.is_low_stock()));
        assert_eq!(repo.count_low_stock().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        repo.insert(&sample_item("i1", 12, 5)).await.unwrap();

        repo.update_quantity("i1", 2).await.unwrap();

        let item = repo.get_by_id("i1").await.unwrap();
        assert_eq!(item.quantity, 2);
        assert!(item.is_low_stock());
    }

    #[tokio::test]
    async fn test_negative_quantity_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        repo.insert(&sample_item("i1", 12, 5)).await.unwrap();

        let result = repo.update_quantity("i1", -1).await;
        assert!(matches!(result, Err(DbError::CheckViolation { .. })));
    }
}
