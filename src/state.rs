use std::sync::Arc;

use crate::config::Config;
use crate::db::{self, Persistence};
use crate::services::{
    ApplicationService, AuthService, StoreApplicationService, StoreAuthService,
};

/// Services wired to one storage backend, shared by every command.
#[derive(Clone)]
pub struct SharedState {
    pub store: Arc<dyn Persistence>,

    pub auth: Arc<dyn AuthService>,

    pub applications: Arc<dyn ApplicationService>,
}

impl SharedState {
    /// Opens the configured backend, falling back to memory when allowed.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = db::open(&config.storage).await?;
        Ok(Self::with_store(store))
    }

    #[must_use]
    pub fn with_store(store: Arc<dyn Persistence>) -> Self {
        Self {
            auth: Arc::new(StoreAuthService::new(store.clone())),
            applications: Arc::new(StoreApplicationService::new(store.clone())),
            store,
        }
    }
}
