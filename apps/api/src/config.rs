//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Only the Paystack secret is required: without it the webhook
//! signature could not be verified and every settlement would be rejected.

use serde::{Deserialize, Serialize};
use std::env;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Paystack secret key. Signs inbound webhooks and authorizes
    /// outbound gateway calls.
    pub paystack_secret_key: String,

    /// Paystack API base URL (override for testing)
    pub paystack_base_url: String,

    /// Public base URL of the client portal, used in payment callbacks
    /// and email links
    pub app_url: String,

    /// Resend API key (optional; email sending is skipped without it)
    pub resend_api_key: Option<String>,

    /// From address for transactional email
    pub email_from: String,

    /// Hugging Face API token (optional; design generation is disabled
    /// without it)
    pub huggingface_api_token: Option<String>,

    /// Directory where generated design images are stored
    pub media_root: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "sartor.db".to_string()),

            paystack_secret_key: env::var("PAYSTACK_SECRET_KEY")
                .map_err(|_| ConfigError::MissingRequired("PAYSTACK_SECRET_KEY".to_string()))?,

            paystack_base_url: env::var("PAYSTACK_BASE_URL")
                .unwrap_or_else(|_| "https://api.paystack.co".to_string()),

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),

            resend_api_key: env::var("RESEND_API_KEY").ok(),

            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Sartor <orders@sartor.example.com>".to_string()),

            huggingface_api_token: env::var("HUGGINGFACE_API_TOKEN").ok(),

            media_root: env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
