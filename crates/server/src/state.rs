use std::sync::Arc;

use strand_core::{Config, StringStore};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<dyn StringStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn StringStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn StringStore {
        self.store.as_ref()
    }
}
