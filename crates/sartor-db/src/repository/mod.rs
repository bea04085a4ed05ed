//! # Repository Layer
//!
//! Data access repositories for each entity.
//!
//! ## Pattern
//! Each repository:
//! - Owns a clone of the connection pool (cheap, reference-counted)
//! - Exposes async CRUD methods returning `DbResult<T>`
//! - Maps rows into `sartor-core` domain types
//!
//! Business rules live in `sartor-core`; repositories only enforce the
//! storage-level invariants (constraints, the settlement guard).

pub mod booking;
pub mod client;
pub mod design;
pub mod inventory;
pub mod order;
