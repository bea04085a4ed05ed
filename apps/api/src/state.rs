//! Shared application state.

use std::sync::Arc;

use sartor_db::Database;

use crate::ai::ImageGenerator;
use crate::config::ApiConfig;
use crate::gateway::PaystackClient;
use crate::media::MediaStore;
use crate::notify::{Notifier, NoopNotifier, ResendNotifier};

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ApiConfig,
    pub paystack: PaystackClient,
    pub notifier: Arc<dyn Notifier>,
    /// None when no API token is configured; the generate endpoint then
    /// answers 502.
    pub image_gen: Option<ImageGenerator>,
    pub media: MediaStore,
}

impl AppState {
    /// Wires up outbound clients from the configuration.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let paystack = PaystackClient::new(
            config.paystack_base_url.clone(),
            config.paystack_secret_key.clone(),
            config.app_url.clone(),
        );

        let notifier: Arc<dyn Notifier> = match &config.resend_api_key {
            Some(key) => Arc::new(ResendNotifier::new(key.clone(), config.email_from.clone())),
            None => Arc::new(NoopNotifier::new()),
        };

        let image_gen = config
            .huggingface_api_token
            .as_ref()
            .map(|token| ImageGenerator::new(token.clone()));

        let media = MediaStore::new(config.media_root.clone());

        AppState {
            db,
            config,
            paystack,
            notifier,
            image_gen,
            media,
        }
    }
}
