//! # Domain Types
//!
//! Core domain types used throughout Sartor.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │      Order      │   │  InventoryItem  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │◄──│  client_id (FK) │   │  item_name      │       │
//! │  │  phone / email  │   │  price_kobo     │   │  quantity       │       │
//! │  │  measurements   │   │  status         │   │  low_stock_…    │       │
//! │  └─────────────────┘   │  payment_status │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │     Booking     │   │     Design      │                              │
//! │  │  public intake  │   │  AI mockup      │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Two Status Axes
//! An `Order` carries two INDEPENDENT state fields:
//! - `status` - the production workflow, driven by the operator
//! - `payment_status` - the financial state, driven ONLY by verified
//!   gateway events through the reconciliation handler
//!
//! An order may be `delivered` while `unpaid`, or `ready` while `paid`.
//! Nothing in this codebase is allowed to conflate the two.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// The production status of an order.
///
/// The wire and storage form is kebab-case (`in-progress`), matching the
/// values the operator UI and the public order portal already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "kebab-case"))]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Order accepted, work not started.
    Pending,
    /// Garment is being cut/sewn.
    InProgress,
    /// Garment finished, awaiting pickup or delivery.
    Ready,
    /// Handed over to the client.
    Delivered,
}

impl OrderStatus {
    /// All statuses in canonical workflow order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Returns the kebab-case wire form of this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Position in the canonical workflow order (0-based).
    ///
    /// Used only to classify a transition as forward or backward for
    /// logging; the workflow itself permits every transition.
    pub const fn rank(&self) -> usize {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::InProgress => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Delivered => 3,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in-progress" => Ok(OrderStatus::InProgress),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// The financial state of an order.
///
/// Set ONLY by the reconciliation handler after a verified gateway event.
/// The operator UI never writes this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No verified settlement yet.
    Unpaid,
    /// Fully settled; `payment_reference` holds the gateway reference.
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Unpaid => f.write_str("unpaid"),
            PaymentStatus::Paid => f.write_str("paid"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A single production job linking a client to a garment.
///
/// Invariants (enforced by the reconciliation handler, not the store):
/// - `payment_reference` is non-null if and only if `payment_status = paid`
/// - `paid_kobo` never exceeds `price_kobo`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Unique identifier (UUID v4). Immutable.
    pub id: String,

    /// The client this garment is for. Required, immutable after creation.
    pub client_id: String,

    /// Free-text garment description ("agbada, navy, gold embroidery").
    pub description: String,

    /// Optional operator notes.
    pub notes: Option<String>,

    /// Agreed price in kobo.
    pub price_kobo: i64,

    /// Cumulative amount received in kobo. Defaults to zero.
    pub paid_kobo: i64,

    /// Target completion date.
    pub deadline: NaiveDate,

    /// Production workflow state (operator driven).
    pub status: OrderStatus,

    /// Financial state (reconciliation handler driven).
    pub payment_status: PaymentStatus,

    /// Gateway transaction reference once paid; None until then.
    pub payment_reference: Option<String>,

    /// When the order was created. Immutable.
    pub created_at: DateTime<Utc>,

    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the agreed price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_kobo(self.price_kobo)
    }

    /// Returns the amount received so far as Money.
    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_kobo(self.paid_kobo)
    }

    /// Returns the outstanding balance (never negative).
    #[inline]
    pub fn outstanding(&self) -> Money {
        self.price().saturating_sub(self.paid())
    }

    /// Checks whether the order is fully settled.
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client of the workshop, with their measurement sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full name.
    pub name: String,

    /// Phone number (primary contact channel).
    pub phone: String,

    /// Email address. Optional, but required to deliver order updates.
    pub email: Option<String>,

    /// Measurement sheet: measurement name → recorded value.
    ///
    /// Free-form on purpose - tailors record what the garment needs
    /// (see [`crate::MEASUREMENT_FIELDS`] for the standard vocabulary).
    /// BTreeMap keeps serialization deterministic.
    pub measurements: BTreeMap<String, String>,

    /// When the client record was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A fabric or haberdashery item tracked in the workshop stockroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: String,
    /// Display name ("Ankara print, blue").
    pub item_name: String,
    /// Quantity on hand in `unit`s.
    pub quantity: i64,
    /// Unit of measure (default "yards").
    pub unit: String,
    /// Optional supplier name.
    pub supplier: Option<String>,
    /// Restock reminder fires at or below this quantity.
    pub low_stock_threshold: i64,
    /// Purchase price per unit in kobo.
    pub price_per_unit_kobo: i64,
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Checks whether the item has dropped to its restock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }

    /// Returns the per-unit price as Money.
    #[inline]
    pub fn price_per_unit(&self) -> Money {
        Money::from_kobo(self.price_per_unit_kobo)
    }
}

// =============================================================================
// Booking
// =============================================================================

/// Status of a public booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Submitted, not yet reviewed.
    Pending,
    /// Workshop has reached out to the customer.
    Contacted,
    /// Converted into an order or declined.
    Closed,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

/// A booking request submitted through the public form.
///
/// Photo fields hold URLs only - binary upload goes to the hosted blob
/// store, which is an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub whatsapp_number: String,
    /// Photo of the customer's own fabric, if provided.
    pub material_photo_url: Option<String>,
    /// Photo of a sample design to copy, if provided.
    pub sample_design_url: Option<String>,
    /// Prompt the customer used for an AI mockup, if any.
    pub ai_prompt: Option<String>,
    /// URL of the AI-generated mockup, if any.
    pub ai_generated_url: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Design
// =============================================================================

/// An AI-generated design mockup kept for the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Design {
    pub id: String,
    /// The prompt that produced the image.
    pub prompt: String,
    /// Public URL of the stored image.
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_round_trip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_serde_is_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_outstanding_balance() {
        let order = sample_order();
        assert_eq!(order.outstanding().kobo(), 4_500_000);
        assert!(!order.is_paid());
    }

    #[test]
    fn test_low_stock() {
        let mut item = InventoryItem {
            id: "i1".to_string(),
            item_name: "Ankara".to_string(),
            quantity: 6,
            unit: "yards".to_string(),
            supplier: None,
            low_stock_threshold: 5,
            price_per_unit_kobo: 250_000,
            created_at: Utc::now(),
        };
        assert!(!item.is_low_stock());
        item.quantity = 5;
        assert!(item.is_low_stock());
        item.quantity = 0;
        assert!(item.is_low_stock());
    }

    fn sample_order() -> Order {
        Order {
            id: "o1".to_string(),
            client_id: "c1".to_string(),
            description: "Agbada, navy".to_string(),
            notes: None,
            price_kobo: 4_500_000,
            paid_kobo: 0,
            deadline: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_reference: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
