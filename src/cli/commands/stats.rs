use tracing::error;

use super::session::open_session_for;
use crate::cli::Credentials;
use crate::db::StorageError;
use crate::services::Permission;
use crate::state::SharedState;

pub async fn cmd_stats(state: &SharedState, credentials: &Credentials) -> anyhow::Result<()> {
    if open_session_for(state, credentials, Permission::ReadAllApplications)
        .await
        .is_none()
    {
        return Ok(());
    }

    let stats = match state.applications.statistics().await {
        Ok(stats) => stats,
        Err(e) => {
            println!("✗ {e}");
            return Ok(());
        }
    };

    println!("Statistics");
    println!("{:-<70}", "");
    println!("Total Users:         {}", stats.total_users);
    println!("Total Applications:  {}", stats.total_applications);
    println!("  Pending:           {}", stats.pending);
    println!("  Approved:          {}", stats.approved);
    println!("  Rejected:          {}", stats.rejected);
    println!("Approval Rate:       {}", stats.approval_rate_display());

    Ok(())
}

/// Reports the active backend and what it holds. Needs no account.
pub async fn cmd_check(state: &SharedState) -> anyhow::Result<()> {
    println!("Storage backend: {}", state.store.kind());

    let counts = async {
        state.store.ping().await?;
        let users = state.store.list_users().await?;
        let applications = state.store.list_all_applications().await?;
        Ok::<_, StorageError>((users.len(), applications.len()))
    };

    match counts.await {
        Ok((users, applications)) => {
            println!("✓ Storage is reachable");
            println!("  Users:        {users}");
            println!("  Applications: {applications}");
        }
        Err(e) => {
            error!(error = %e, "Storage check failed");
            println!("✗ {e}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::db::{BackendKind, MemoryStore, Persistence};
    use crate::domain::{Application, ApplicationId, NewApplication, User};

    /// Backend whose every call fails, like a database that went away.
    struct UnreachableStore;

    fn gone() -> StorageError {
        StorageError::Database("connection closed".to_string())
    }

    #[async_trait]
    impl Persistence for UnreachableStore {
        fn kind(&self) -> BackendKind {
            BackendKind::Durable
        }

        async fn ping(&self) -> Result<(), StorageError> {
            Err(gone())
        }

        async fn authenticate(&self, _: &str, _: &str) -> Result<Option<User>, StorageError> {
            Err(gone())
        }

        async fn register(&self, _: User) -> Result<(), StorageError> {
            Err(gone())
        }

        async fn list_users(&self) -> Result<Vec<User>, StorageError> {
            Err(gone())
        }

        async fn save_application(&self, _: NewApplication) -> Result<ApplicationId, StorageError> {
            Err(gone())
        }

        async fn list_all_applications(&self) -> Result<Vec<Application>, StorageError> {
            Err(gone())
        }

        async fn find_application_by_id(
            &self,
            _: ApplicationId,
        ) -> Result<Option<Application>, StorageError> {
            Err(gone())
        }

        async fn list_applications_by_user(
            &self,
            _: &str,
        ) -> Result<Vec<Application>, StorageError> {
            Err(gone())
        }

        async fn update_application(&self, _: &Application) -> Result<bool, StorageError> {
            Err(gone())
        }

        async fn delete_application(&self, _: ApplicationId) -> Result<bool, StorageError> {
            Err(gone())
        }
    }

    #[tokio::test]
    async fn check_reports_storage_failure_without_failing() {
        let state = SharedState::with_store(Arc::new(UnreachableStore));
        assert!(cmd_check(&state).await.is_ok());
    }

    #[tokio::test]
    async fn check_succeeds_on_healthy_store() {
        let state = SharedState::with_store(Arc::new(MemoryStore::seeded()));
        assert!(cmd_check(&state).await.is_ok());
    }
}
