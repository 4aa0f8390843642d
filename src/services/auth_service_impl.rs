//! [`AuthService`] over any [`Persistence`] backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::constants::limits::USERNAME_MAX_LEN;
use crate::db::Persistence;
use crate::domain::{Role, User};
use crate::services::access::{Permission, Session};
use crate::services::auth_service::{AuthError, AuthService};
use crate::validation::{validate_max_len, validate_non_empty};

pub struct StoreAuthService {
    store: Arc<dyn Persistence>,
}

impl StoreAuthService {
    #[must_use]
    pub fn new(store: Arc<dyn Persistence>) -> Self {
        Self { store }
    }

    async fn create_account(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let username = validate_non_empty(username, "Username")?;
        let username = validate_max_len(username, "Username", USERNAME_MAX_LEN)?;
        validate_non_empty(password, "Password")?;

        let user = User::new(username, password, role);
        self.store.register(user.clone()).await?;

        info!(username = %user.username, role = %user.role, "Registered user");
        Ok(user)
    }
}

#[async_trait]
impl AuthService for StoreAuthService {
    async fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        match self.store.authenticate(username, password).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Authentication lookup failed");
                None
            }
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.authenticate(username, password)
            .await
            .map(Session::from_user)
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        self.create_account(username, password, Role::User).await
    }

    async fn add_user(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        session.require(Permission::ManageUsers)?;
        self.create_account(username, password, role).await
    }

    async fn list_users(&self, session: &Session) -> Result<Vec<User>, AuthError> {
        session.require(Permission::ManageUsers)?;
        Ok(self.store.list_users().await?)
    }
}
