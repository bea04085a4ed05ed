//! HTTP request handlers.
//!
//! One module per resource. Request/response DTOs live next to the
//! handlers that use them; wire JSON is camelCase, domain types stay
//! snake_case.

pub mod bookings;
pub mod clients;
pub mod dashboard;
pub mod designs;
pub mod email;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod payments;
pub mod webhook;
