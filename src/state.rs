use std::sync::Arc;

use crate::auth::{AuthError, Credentials};
use crate::config::AppConfig;
use crate::database::Store;

/// Shared, immutable application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Result<Self, AuthError> {
        let credentials = Credentials::from_config(&config.security)?;
        Ok(Self {
            config: Arc::new(config),
            store,
            credentials: Arc::new(credentials),
        })
    }
}
