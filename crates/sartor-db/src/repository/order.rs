//! # Order Repository
//!
//! Persistence for tailoring orders, including the payment settlement path.
//!
//! ## Two Status Columns, Two Writers
//! An order carries two independent status columns:
//! - `status` - production progress, written only by `update_status()`
//! - `payment_status` - settlement state, written only by `settle_payment()`
//!
//! No method in this module touches both. Keeping the writers separate is
//! what guarantees a payment can never move an order through the workshop,
//! and a workshop update can never mark an order paid.
//!
//! ## Settlement Guard
//! `settle_payment()` is a single guarded UPDATE:
//!
//! ```text
//! UPDATE orders SET payment_status = 'paid', ...
//! WHERE id = ? AND (payment_status = 'unpaid' OR payment_reference = ?)
//! ```
//!
//! SQLite's single-writer model makes the statement atomic, so concurrent
//! deliveries of the same webhook serialize here: the first settles, a
//! racing duplicate rewrites identical values, and a sequential duplicate
//! is short-circuited without a write. A delivery carrying a *different*
//! reference against an already-paid order fails the guard and is reported
//! as a conflict instead of overwriting the recorded reference.

use chrono::Utc;
use sartor_core::{Order, OrderStatus};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Column list shared by every SELECT in this module.
const ORDER_COLUMNS: &str = "id, client_id, description, notes, price_kobo, paid_kobo, \
     deadline, status, payment_status, payment_reference, created_at, updated_at";

// =============================================================================
// Settlement Outcome
// =============================================================================

/// Result of attempting to settle a payment against an order.
#[derive(Debug, Clone)]
pub enum SettlementOutcome {
    /// The order was unpaid and is now settled in full.
    Applied(Order),

    /// The order was already settled by this same reference. Nothing
    /// changed; the caller should acknowledge and move on.
    Duplicate(Order),

    /// The order is already settled by a *different* reference. The stored
    /// record was left untouched.
    Conflict {
        order_id: String,
        existing_reference: Option<String>,
    },

    /// No order with this id exists.
    NotFound { order_id: String },
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order records.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new order repository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - The referenced client does not exist
    /// * `DbError::UniqueViolation` - An order with this id already exists
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, client_id, description, notes, price_kobo, paid_kobo,
                deadline, status, payment_status, payment_reference,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&order.id)
        .bind(&order.client_id)
        .bind(&order.description)
        .bind(&order.notes)
        .bind(order.price_kobo)
        .bind(order.paid_kobo)
        .bind(order.deadline)
        .bind(order.status)
        .bind(order.payment_status)
        .bind(&order.payment_reference)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(order_id = %order.id, "Order inserted");
        Ok(())
    }

    /// Fetches an order by id.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No order with this id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Order> {
        self.fetch_optional(id)
            .await?
            .ok_or_else(|| DbError::not_found("order", id))
    }

    /// Lists orders, newest first, optionally filtered by production status.
    pub async fn list(&self, status: Option<OrderStatus>) -> DbResult<Vec<Order>> {
        let orders = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE status = ?1 ORDER BY created_at DESC"
                ))
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Lists all orders for a given client, newest first.
    pub async fn list_by_client(&self, client_id: &str) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE client_id = ?1 ORDER BY created_at DESC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Updates an order's production status.
    ///
    /// Writes `status` and `updated_at` only. Payment columns are owned by
    /// `settle_payment()` and are never touched here.
    ///
    /// ## Returns
    /// The order as it was *before* the update, so the caller can classify
    /// the transition for logging and notification.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No order with this id
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> DbResult<Order> {
        let previous = self.get_by_id(id).await?;

        sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        debug!(
            order_id = %id,
            from = %previous.status,
            to = %status,
            "Order status updated"
        );

        Ok(previous)
    }

    /// Settles a payment against an order.
    ///
    /// Marks the order fully paid (`paid_kobo = price_kobo`) and records the
    /// gateway reference. Safe to call any number of times with the same
    /// reference; see the module docs for the guard semantics.
    ///
    /// ## Arguments
    /// * `order_id` - The order the gateway event points at
    /// * `reference` - The gateway transaction reference
    pub async fn settle_payment(
        &self,
        order_id: &str,
        reference: &str,
    ) -> DbResult<SettlementOutcome> {
        let before = match self.fetch_optional(order_id).await? {
            Some(order) => order,
            None => {
                return Ok(SettlementOutcome::NotFound {
                    order_id: order_id.to_string(),
                })
            }
        };

        if before.is_paid() && before.payment_reference.as_deref() == Some(reference) {
            // Redelivery of an applied settlement. No write at all, so the
            // record (updated_at included) is observably unchanged.
            debug!(order_id = %order_id, reference = %reference, "Duplicate settlement, no change");
            return Ok(SettlementOutcome::Duplicate(before));
        }

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = 'paid',
                payment_reference = ?2,
                paid_kobo = price_kobo,
                updated_at = ?3
            WHERE id = ?1
              AND (payment_status = 'unpaid' OR payment_reference = ?2)
            "#,
        )
        .bind(order_id)
        .bind(reference)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Guard failed: settled by a different reference, or the order
            // vanished between the read and the write.
            return match self.fetch_optional(order_id).await? {
                Some(existing) => {
                    warn!(
                        order_id = %order_id,
                        reference = %reference,
                        existing = ?existing.payment_reference,
                        "Settlement conflict: order already paid with a different reference"
                    );
                    Ok(SettlementOutcome::Conflict {
                        order_id: order_id.to_string(),
                        existing_reference: existing.payment_reference,
                    })
                }
                None => Ok(SettlementOutcome::NotFound {
                    order_id: order_id.to_string(),
                }),
            };
        }

        let after = self.get_by_id(order_id).await?;
        debug!(
            order_id = %order_id,
            reference = %reference,
            paid_kobo = after.paid_kobo,
            "Payment settled"
        );
        Ok(SettlementOutcome::Applied(after))
    }

    /// Counts orders not yet delivered.
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE status != 'delivered'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Sums paid amounts across settled orders, in kobo.
    pub async fn revenue_kobo(&self) -> DbResult<i64> {
        let sum: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(paid_kobo), 0) FROM orders WHERE payment_status = 'paid'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(sum.0)
    }

    async fn fetch_optional(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use sartor_core::{Client, PaymentStatus};
    use std::collections::BTreeMap;

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let client = Client {
            id: "c1".to_string(),
            name: "Ngozi Eze".to_string(),
            phone: "08012345678".to_string(),
            email: None,
            measurements: BTreeMap::new(),
            created_at: Utc::now(),
        };
        db.clients().insert(&client).await.unwrap();

        db
    }

    fn sample_order(id: &str, price_kobo: i64) -> Order {
        let now = Utc::now();
        Order {
            id: id.to_string(),
            client_id: "c1".to_string(),
            description: "Agbada, royal blue".to_string(),
            notes: None,
            price_kobo,
            paid_kobo: 0,
            deadline: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_reference: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = test_db().await;
        let repo = db.orders();

        repo.insert(&sample_order("o1", 45_000_00)).await.unwrap();

        let order = repo.get_by_id("o1").await.unwrap();
        assert_eq!(order.price_kobo, 45_000_00);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    }

    #[tokio::test]
    async fn test_insert_unknown_client_rejected() {
        let db = test_db().await;
        let mut order = sample_order("o1", 1000);
        order.client_id = "ghost".to_string();

        let result = db.orders().insert(&order).await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }

    #[tokio::test]
    async fn test_list_filtered_by_status() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order("o1", 1000)).await.unwrap();
        repo.insert(&sample_order("o2", 2000)).await.unwrap();
        repo.update_status("o2", OrderStatus::Ready).await.unwrap();

        let ready = repo.list(Some(OrderStatus::Ready)).await.unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id, "o2");

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_settle_payment_applies_full_amount() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order("o1", 45_000_00)).await.unwrap();

        let outcome = repo.settle_payment("o1", "PAY-1").await.unwrap();
        let order = match outcome {
            SettlementOutcome::Applied(order) => order,
            other => panic!("expected Applied, got {other:?}"),
        };

        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.paid_kobo, 45_000_00);
        assert_eq!(order.payment_reference.as_deref(), Some("PAY-1"));
        // Production status is untouched by settlement.
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_settle_payment_is_idempotent() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order("o1", 45_000_00)).await.unwrap();

        repo.settle_payment("o1", "PAY-1").await.unwrap();
        let first = repo.get_by_id("o1").await.unwrap();

        let outcome = repo.settle_payment("o1", "PAY-1").await.unwrap();
        let second = match outcome {
            SettlementOutcome::Duplicate(order) => order,
            other => panic!("expected Duplicate, got {other:?}"),
        };

        assert_eq!(second.paid_kobo, first.paid_kobo);
        assert_eq!(second.payment_reference, first.payment_reference);
        assert_eq!(second.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_settle_payment_conflict_preserves_record() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order("o1", 45_000_00)).await.unwrap();
        repo.settle_payment("o1", "PAY-1").await.unwrap();

        let outcome = repo.settle_payment("o1", "PAY-2").await.unwrap();
        match outcome {
            SettlementOutcome::Conflict {
                existing_reference, ..
            } => assert_eq!(existing_reference.as_deref(), Some("PAY-1")),
            other => panic!("expected Conflict, got {other:?}"),
        }

        let order = repo.get_by_id("o1").await.unwrap();
        assert_eq!(order.payment_reference.as_deref(), Some("PAY-1"));
    }

    #[tokio::test]
    async fn test_settle_payment_missing_order() {
        let db = test_db().await;

        let outcome = db.orders().settle_payment("ghost", "PAY-1").await.unwrap();
        assert!(matches!(outcome, SettlementOutcome::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_status_does_not_touch_payment() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order("o1", 45_000_00)).await.unwrap();
        repo.settle_payment("o1", "PAY-1").await.unwrap();

        let previous = repo.update_status("o1", OrderStatus::Delivered).await.unwrap();
        assert_eq!(previous.status, OrderStatus::Pending);

        let order = repo.get_by_id("o1").await.unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.payment_reference.as_deref(), Some("PAY-1"));
    }

    #[tokio::test]
    async fn test_backward_status_transition_accepted() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order("o1", 1000)).await.unwrap();
        repo.update_status("o1", OrderStatus::Ready).await.unwrap();

        repo.update_status("o1", OrderStatus::InProgress)
            .await
            .unwrap();

        let order = repo.get_by_id("o1").await.unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
    }

    #[tokio::test]
    async fn test_dashboard_aggregates() {
        let db = test_db().await;
        let repo = db.orders();
        repo.insert(&sample_order("o1", 10_000_00)).await.unwrap();
        repo.insert(&sample_order("o2", 20_000_00)).await.unwrap();
        repo.insert(&sample_order("o3", 5_000_00)).await.unwrap();

        repo.settle_payment("o1", "PAY-1").await.unwrap();
        repo.settle_payment("o2", "PAY-2").await.unwrap();
        repo.update_status("o3", OrderStatus::Delivered).await.unwrap();

        assert_eq!(repo.revenue_kobo().await.unwrap(), 30_000_00);
        assert_eq!(repo.count_active().await.unwrap(), 2);
    }
}
