//! Domain service for authentication and account management.
//!
//! Handles login, self-service registration, and admin-side user creation.

use thiserror::Error;

use crate::db::StorageError;
use crate::domain::{Role, User};
use crate::services::access::{AccessDenied, Session};
use crate::validation::ValidationError;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict(username) => Self::UsernameTaken(username),
            other => Self::Storage(other),
        }
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Looks up a user by exact username and password.
    ///
    /// Backend failures are logged and reported as no match.
    async fn authenticate(&self, username: &str, password: &str) -> Option<User>;

    /// Authenticates and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if no user matches.
    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError>;

    /// Self-service registration. New accounts always get [`Role::User`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] if the username exists.
    async fn register(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Creates an account with any role. Admin only.
    async fn add_user(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError>;

    /// Lists every account. Admin only.
    async fn list_users(&self, session: &Session) -> Result<Vec<User>, AuthError>;
}
