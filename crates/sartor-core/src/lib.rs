//! # sartor-core: Pure Business Logic for Sartor
//!
//! This crate is the **heart** of Sartor, a management backend for a
//! tailoring workshop. It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sartor Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/api)                          │   │
//! │  │   webhook ──► orders ──► clients ──► inventory ──► bookings    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sartor-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ workflow  │  │ validation│  │   │
//! │  │   │  Order    │  │   Money   │  │ statuses  │  │   rules   │  │   │
//! │  │   │  Client   │  │  (kobo)   │  │ templates │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sartor-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, Client, InventoryItem, Booking, Design)
//! - [`money`] - Money type with integer kobo arithmetic (no floating point!)
//! - [`workflow`] - Production status workflow and notification templates
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in kobo (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Orthogonal Axes**: Production status and payment status never touch
//!    each other - the workflow mutates one, the reconciliation path the other

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod workflow;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sartor_core::Money` instead of
// `use sartor_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;
pub use workflow::{classify_transition, render_order_update, EmailMessage, TransitionKind};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Measurement names collected on the new-client form.
///
/// ## Why a constant?
/// The measurement sheet is a name to value map at rest, but the intake
/// form always offers this fixed set. [`validation::validate_measurements`]
/// rejects names outside it so sheets stay comparable across operators.
pub const MEASUREMENT_FIELDS: [&str; 10] = [
    "chest",
    "waist",
    "hips",
    "shoulder",
    "sleeve_length",
    "neck",
    "length",
    "thigh",
    "ankle",
    "knee",
];

/// Maximum length of a garment description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Default low-stock threshold for new inventory items.
///
/// ## Business Reason
/// Matches the intake form default: five yards is roughly one outfit, so
/// anything at or below it deserves a restock reminder.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
