//! Transactional email notifications.
//!
//! The [`Notifier`] trait is the seam between the status workflow and the
//! email provider. Two implementations:
//! - [`ResendNotifier`] - sends through the Resend HTTP API
//! - [`NoopNotifier`] - used when no API key is configured; logs and
//!   pretends success so the rest of the system behaves identically in
//!   development
//!
//! Delivery is best effort by design. A status update must never fail
//! because the email provider is down; callers log a warning and move on.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Notification failure.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Email request failed: {0}")]
    Request(String),

    #[error("Email provider rejected the message: {0}")]
    Rejected(String),
}

/// Outbound email delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one HTML email.
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError>;
}

// =============================================================================
// Resend
// =============================================================================

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Notifier backed by the Resend API.
#[derive(Debug, Clone)]
pub struct ResendNotifier {
    http: Client,
    api_key: String,
    from: String,
}

impl ResendNotifier {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        ResendNotifier {
            http: Client::new(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError> {
        let request = ResendRequest {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let response = self
            .http
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected(format!("{status}: {body}")));
        }

        debug!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

// =============================================================================
// Noop
// =============================================================================

/// Notifier that logs instead of sending.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    pub fn new() -> Self {
        warn!("No email API key configured; notifications will be logged, not sent");
        NoopNotifier
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<(), NotifyError> {
        info!(to = %to, subject = %subject, "Email skipped (no API key configured)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_notifier_always_succeeds() {
        let notifier = NoopNotifier;
        let result = notifier
            .send("client@example.com", "Test", "<p>hello</p>")
            .await;
        assert!(result.is_ok());
    }
}
