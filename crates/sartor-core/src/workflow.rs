//! # Status Workflow Module
//!
//! The production status workflow and the notification template tied to it.
//!
//! ## Workflow Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Production Status Workflow                              │
//! │                                                                         │
//! │   pending ──► in-progress ──► ready ──► delivered                      │
//! │      ▲             ▲   │        │  ▲                                    │
//! │      └─────────────┴───┴────────┘  │                                    │
//! │            any transition is legal ┘                                    │
//! │                                                                         │
//! │  The workflow is deliberately permissive: a "ready" garment that       │
//! │  fails inspection goes back to "in-progress" for rework. Backward      │
//! │  moves are classified so the caller can log them, never rejected.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On every transition the caller persists the new status FIRST, then
//! attempts the client notification. Notification failure must never roll
//! back a committed status change.

use crate::types::OrderStatus;

// =============================================================================
// Transition Classification
// =============================================================================

/// How a status change relates to the canonical workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Moves the order further along the workflow.
    Forward,
    /// Reverts to an earlier stage (rework).
    Backward,
    /// Re-selects the current status. Harmless; no notification needed.
    Unchanged,
}

/// Classifies a status transition.
///
/// Every transition is legal - this exists so the caller can log backward
/// moves (rework) and skip the notification for no-op re-selections.
///
/// ## Example
/// ```rust
/// use sartor_core::types::OrderStatus;
/// use sartor_core::workflow::{classify_transition, TransitionKind};
///
/// let kind = classify_transition(OrderStatus::Ready, OrderStatus::InProgress);
/// assert_eq!(kind, TransitionKind::Backward);
/// ```
pub fn classify_transition(from: OrderStatus, to: OrderStatus) -> TransitionKind {
    use std::cmp::Ordering;

    match to.rank().cmp(&from.rank()) {
        Ordering::Greater => TransitionKind::Forward,
        Ordering::Less => TransitionKind::Backward,
        Ordering::Equal => TransitionKind::Unchanged,
    }
}

// =============================================================================
// Notification Template
// =============================================================================

/// A rendered email, ready for the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
}

/// Renders the "order update" message sent to a client after a status
/// change.
///
/// Pure function so the template is testable without a mail transport.
/// `portal_base_url` is the public site root; the message links to the
/// client-facing order portal page.
pub fn render_order_update(
    client_name: &str,
    order_id: &str,
    status: OrderStatus,
    portal_base_url: &str,
) -> EmailMessage {
    let subject = format!("Sartor Order Update - #{order_id}");
    let html = format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: auto; padding: 20px; border: 1px solid #eee;">
  <h2 style="color: #064e3b;">Sartor Order Update</h2>
  <p>Hello {client_name},</p>
  <p>Your order <strong>#{order_id}</strong> status has been updated to: <strong>{status}</strong>.</p>
  <p>View your order details here: <a href="{portal_base_url}/order/{order_id}">Order Portal</a></p>
  <br/>
  <p>Thank you for choosing Sartor!</p>
</div>"#
    );

    EmailMessage { subject, html }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transition() {
        assert_eq!(
            classify_transition(OrderStatus::Pending, OrderStatus::InProgress),
            TransitionKind::Forward
        );
        assert_eq!(
            classify_transition(OrderStatus::Pending, OrderStatus::Delivered),
            TransitionKind::Forward
        );
    }

    #[test]
    fn test_backward_transition_is_classified_not_rejected() {
        // Rework path: a ready garment goes back to the table.
        assert_eq!(
            classify_transition(OrderStatus::Ready, OrderStatus::InProgress),
            TransitionKind::Backward
        );
        assert_eq!(
            classify_transition(OrderStatus::Delivered, OrderStatus::Pending),
            TransitionKind::Backward
        );
    }

    #[test]
    fn test_unchanged_transition() {
        for status in OrderStatus::ALL {
            assert_eq!(classify_transition(status, status), TransitionKind::Unchanged);
        }
    }

    #[test]
    fn test_render_order_update() {
        let msg = render_order_update("Ada", "o1", OrderStatus::Ready, "https://sartor.example");

        assert_eq!(msg.subject, "Sartor Order Update - #o1");
        assert!(msg.html.contains("Hello Ada,"));
        assert!(msg.html.contains("<strong>ready</strong>"));
        assert!(msg.html.contains("https://sartor.example/order/o1"));
    }

    #[test]
    fn test_render_uses_kebab_case_status() {
        let msg = render_order_update("Ada", "o1", OrderStatus::InProgress, "https://s.example");
        assert!(msg.html.contains("<strong>in-progress</strong>"));
    }
}
