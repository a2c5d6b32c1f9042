use std::sync::Arc;

use crate::config::Config;
use crate::provider::local::LocalProvider;
use crate::provider::{DocumentStore, IdentityProvider};

/// The application's state: the provider handles and the configuration,
/// constructed once at startup and passed into every operation explicitly.
#[derive(Clone)]
pub struct AppState {
    /// The identity side of the provider.
    pub auth: Arc<dyn IdentityProvider>,
    /// The document side of the provider.
    pub store: Arc<dyn DocumentStore>,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates an `AppState` backed by the local provider.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    pub fn new(config: &Config) -> Self {
        let provider = Arc::new(LocalProvider::new(config.session_signing_key.clone()));
        tracing::info!("✅ Local identity/document-store provider initialized");
        Self::with_provider(config, provider)
    }

    /// Creates an `AppState` around an existing provider handle, letting the
    /// caller keep direct access to it for seeding.
    pub fn with_provider(config: &Config, provider: Arc<LocalProvider>) -> Self {
        AppState {
            auth: provider.clone(),
            store: provider,
            config: config.clone(),
        }
    }
}
