//! Domain service for the connection-request lifecycle.
//!
//! An applicant may hold at most one active (pending or approved) request.
//! Administrators move requests freely between the three statuses; there is
//! no terminal state.

use serde::Serialize;
use thiserror::Error;

use crate::db::StorageError;
use crate::domain::{Application, ApplicationId, ApplicationStatus};
use crate::services::access::AccessDenied;
use crate::validation::ValidationError;

/// Errors specific to application operations.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(
        "{0} already has a PENDING or APPROVED application. A new request cannot be submitted until it is settled."
    )]
    Blocked(String),

    #[error("Application not found: {0}")]
    NotFound(ApplicationId),

    #[error("No such applicant: {0}")]
    UnknownApplicant(String),

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnknownApplicant(username) => Self::UnknownApplicant(username),
            other => Self::Storage(other),
        }
    }
}

/// Raw form input for a new request, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub num_connections: String,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ApplicationStats {
    pub total_users: usize,
    pub total_applications: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ApplicationStats {
    #[must_use]
    pub fn from_applications(total_users: usize, applications: &[Application]) -> Self {
        let mut stats = Self {
            total_users,
            total_applications: applications.len(),
            ..Self::default()
        };

        for app in applications {
            match app.status {
                ApplicationStatus::Pending => stats.pending += 1,
                ApplicationStatus::Approved => stats.approved += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
            }
        }

        stats
    }

    /// Approved share of all applications, in percent. Zero when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn approval_rate(&self) -> f64 {
        if self.total_applications == 0 {
            return 0.0;
        }
        self.approved as f64 / self.total_applications as f64 * 100.0
    }

    #[must_use]
    pub fn approval_rate_display(&self) -> String {
        format!("{:.1}%", self.approval_rate())
    }
}

/// True if any of the applicant's requests is still pending or approved.
#[must_use]
pub fn has_active_application(applications: &[Application]) -> bool {
    applications.iter().any(|a| a.status.is_active())
}

/// Domain service trait for the application lifecycle.
///
/// Implementations trust the caller; role checks happen at the front end
/// via [`Session`](crate::services::access::Session).
#[async_trait::async_trait]
pub trait ApplicationService: Send + Sync {
    /// Validates the form and stores a new pending request for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Validation`] for bad input and
    /// [`ApplicationError::Blocked`] if the applicant already has an active request.
    async fn create(
        &self,
        username: &str,
        form: &ApplicationForm,
    ) -> Result<ApplicationId, ApplicationError>;

    /// All requests by one applicant, newest first where the backend orders.
    async fn list_by_user(&self, username: &str) -> Result<Vec<Application>, ApplicationError>;

    async fn list_all(&self) -> Result<Vec<Application>, ApplicationError>;

    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, ApplicationError>;

    async fn get(&self, id: ApplicationId) -> Result<Application, ApplicationError>;

    /// Overwrites the status. Any status may follow any other.
    async fn set_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationError>;

    /// Permanently removes a request. Returns `false` if it did not exist.
    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationError>;

    async fn statistics(&self) -> Result<ApplicationStats, ApplicationError>;
}
