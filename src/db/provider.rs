//! Storage contract shared by the durable and volatile backends.
//!
//! Call sites hold an `Arc<dyn Persistence>` and never branch on which
//! backend is behind it. [`open`] picks the backend once at startup.

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::Store;
use super::memory::MemoryStore;
use crate::config::{BackendChoice, StorageConfig};
use crate::domain::{Application, ApplicationId, NewApplication, UnknownVariant, User};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Username already exists: {0}")]
    Conflict(String),

    #[error("No such applicant: {0}")]
    UnknownApplicant(String),

    #[error("Invalid stored value: {0}")]
    InvalidData(#[from] UnknownVariant),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for StorageError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Which backend ended up serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Durable,
    Volatile,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Durable => f.write_str("durable (SQLite)"),
            Self::Volatile => f.write_str("volatile (in-memory)"),
        }
    }
}

#[async_trait]
pub trait Persistence: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Confirms the backend still answers.
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Exact, case-sensitive match on both username and password.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StorageError>;

    /// Fails with [`StorageError::Conflict`] when the username is taken.
    async fn register(&self, user: User) -> Result<(), StorageError>;

    async fn list_users(&self) -> Result<Vec<User>, StorageError>;

    /// Stores the request and returns the id assigned to it.
    async fn save_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationId, StorageError>;

    async fn list_all_applications(&self) -> Result<Vec<Application>, StorageError>;

    async fn find_application_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, StorageError>;

    async fn list_applications_by_user(
        &self,
        username: &str,
    ) -> Result<Vec<Application>, StorageError>;

    /// Replaces the stored record with the same id. Returns `false` if there was none.
    async fn update_application(&self, application: &Application) -> Result<bool, StorageError>;

    /// Returns `false` if nothing was deleted.
    async fn delete_application(&self, id: ApplicationId) -> Result<bool, StorageError>;
}

/// Opens the configured backend.
///
/// With [`BackendChoice::Auto`] a durable store that fails to start is
/// replaced by a volatile one; the fallback is logged, never returned as an error.
pub async fn open(config: &StorageConfig) -> anyhow::Result<Arc<dyn Persistence>> {
    match config.backend {
        BackendChoice::Volatile => {
            info!("Using volatile in-memory storage");
            Ok(Arc::new(volatile_store(config)))
        }
        BackendChoice::Durable => {
            let store = durable_store(config)
                .await
                .with_context(|| format!("Failed to open database {}", config.database_path))?;
            Ok(Arc::new(store))
        }
        BackendChoice::Auto => match durable_store(config).await {
            Ok(store) => Ok(Arc::new(store)),
            Err(e) => {
                warn!(
                    database = %config.database_path,
                    error = %e,
                    "Durable storage unavailable, falling back to in-memory storage; data will not survive a restart"
                );
                Ok(Arc::new(volatile_store(config)))
            }
        },
    }
}

async fn durable_store(config: &StorageConfig) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.database_path,
        config.max_connections,
        config.min_connections,
    )
    .await
}

fn volatile_store(config: &StorageConfig) -> MemoryStore {
    if config.seed_defaults {
        MemoryStore::seeded()
    } else {
        MemoryStore::new()
    }
}
