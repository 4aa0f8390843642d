//! Volatile backend: everything lives in process memory and is lost on exit.
//!
//! Records keep insertion order; nothing is sorted. Ids come from a counter
//! that starts at 1001.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::provider::{BackendKind, Persistence, StorageError};
use crate::constants::{ids::FIRST_VOLATILE_APPLICATION_ID, seed};
use crate::domain::{
    Application, ApplicationId, ApplicationStatus, NewApplication, Role, User,
};

#[derive(Debug)]
struct MemoryState {
    users: Vec<User>,
    applications: Vec<Application>,
    next_id: i32,
}

#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                users: Vec::new(),
                applications: Vec::new(),
                next_id: FIRST_VOLATILE_APPLICATION_ID,
            }),
        }
    }

    /// A store holding the same defaults the database seed migration writes.
    #[must_use]
    pub fn seeded() -> Self {
        let users = vec![
            User::new(seed::ADMIN_USERNAME, seed::ADMIN_PASSWORD, Role::Admin),
            User::new(seed::USER_USERNAME, seed::USER_PASSWORD, Role::User),
        ];
        let sample = NewApplication {
            applicant_username: seed::USER_USERNAME.to_string(),
            name: seed::SAMPLE_NAME.to_string(),
            mobile_no: seed::SAMPLE_MOBILE.to_string(),
            address: seed::SAMPLE_ADDRESS.to_string(),
            num_connections: seed::SAMPLE_CONNECTIONS,
            status: ApplicationStatus::Pending,
        };

        Self {
            state: RwLock::new(MemoryState {
                users,
                applications: vec![
                    sample.into_application(ApplicationId::new(FIRST_VOLATILE_APPLICATION_ID)),
                ],
                next_id: FIRST_VOLATILE_APPLICATION_ID + 1,
            }),
        }
    }
}

#[async_trait]
impl Persistence for MemoryStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Volatile
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StorageError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }

    async fn register(&self, user: User) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(StorageError::Conflict(user.username));
        }
        state.users.push(user);
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.state.read().await.users.clone())
    }

    async fn save_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationId, StorageError> {
        let mut state = self.state.write().await;
        if !state
            .users
            .iter()
            .any(|u| u.username == application.applicant_username)
        {
            return Err(StorageError::UnknownApplicant(
                application.applicant_username,
            ));
        }

        let id = ApplicationId::new(state.next_id);
        state.next_id += 1;
        state.applications.push(application.into_application(id));
        debug!(%id, "Stored application in memory");
        Ok(id)
    }

    async fn list_all_applications(&self) -> Result<Vec<Application>, StorageError> {
        Ok(self.state.read().await.applications.clone())
    }

    async fn find_application_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, StorageError> {
        let state = self.state.read().await;
        Ok(state.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn list_applications_by_user(
        &self,
        username: &str,
    ) -> Result<Vec<Application>, StorageError> {
        let state = self.state.read().await;
        Ok(state
            .applications
            .iter()
            .filter(|a| a.applicant_username == username)
            .cloned()
            .collect())
    }

    async fn update_application(&self, application: &Application) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        let Some(existing) = state
            .applications
            .iter_mut()
            .find(|a| a.id == application.id)
        else {
            return Ok(false);
        };

        existing.name.clone_from(&application.name);
        existing.mobile_no.clone_from(&application.mobile_no);
        existing.address.clone_from(&application.address);
        existing.num_connections = application.num_connections;
        existing.status = application.status;
        Ok(true)
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        let before = state.applications.len();
        state.applications.retain(|a| a.id != id);
        Ok(state.applications.len() != before)
    }
}
