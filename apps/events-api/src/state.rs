//! Application state management.
//!
//! Shared state handed to route constructors: configuration, the token
//! authority and the events store.

use crate::config::Config;
use axum_helpers::TokenAuth;
use domain_events::JsonFileEventStore;

/// Shared application state.
///
/// Cloning is cheap: the token authority is behind an `Arc` and the store
/// only holds a path.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// Issues and verifies access tokens
    pub auth: TokenAuth,
    /// Events document on disk
    pub store: JsonFileEventStore,
}

impl AppState {
    pub fn new(config: Config) -> eyre::Result<Self> {
        let auth = TokenAuth::new(&config.auth)?;
        let store = JsonFileEventStore::from_config(&config.store);

        Ok(Self {
            config,
            auth,
            store,
        })
    }
}
