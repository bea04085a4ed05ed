//! # Validation Module
//!
//! Input validation utilities for Sartor.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (deserialization)                               │
//! │  ├── Type validation (serde rejects malformed JSON)                    │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK constraints (status vocabulary)                             │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: both layers catch different errors                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LEN, MEASUREMENT_FIELDS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person/display name (client, booking customer, inventory item).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a phone / WhatsApp number.
///
/// ## Rules
/// - Must not be empty
/// - 7 to 20 characters
/// - Digits with optional leading `+`, spaces and hyphens allowed
pub fn validate_phone(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=20).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain 7 to 20 digits".to_string(),
        });
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "may contain only digits, '+', spaces, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// Deliberately shallow (`local@domain` shape only) - the mail provider is
/// the authority on deliverability.
pub fn validate_email(value: &str) -> ValidationResult<()> {
    let value = value.trim();

    let valid = value
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected local@domain".to_string(),
        });
    }

    Ok(())
}

/// Validates a garment description.
pub fn validate_description(value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if value.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a measurement sheet against the intake form vocabulary
/// ([`MEASUREMENT_FIELDS`]).
///
/// The sheet is a name to value map at rest; this keeps the names from
/// drifting per operator ("sleeve" vs "sleeve_length").
pub fn validate_measurements(sheet: &BTreeMap<String, String>) -> ValidationResult<()> {
    for name in sheet.keys() {
        if !MEASUREMENT_FIELDS.contains(&name.as_str()) {
            return Err(ValidationError::InvalidFormat {
                field: "measurements".to_string(),
                reason: format!("unknown measurement: {name}"),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary amount in kobo (price, price per unit).
///
/// ## Rules
/// - Must not be negative (zero is fine: family jobs happen)
pub fn validate_amount_kobo(field: &str, kobo: i64) -> ValidationResult<()> {
    if kobo < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a stock quantity or threshold.
pub fn validate_quantity(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an AI generation prompt.
pub fn validate_prompt(value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "prompt".to_string(),
        });
    }

    if value.len() > 1000 {
        return Err(ValidationError::TooLong {
            field: "prompt".to_string(),
            max: 1000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
