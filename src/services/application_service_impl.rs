//! [`ApplicationService`] over any [`Persistence`] backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Persistence;
use crate::domain::{Application, ApplicationId, ApplicationStatus, NewApplication};
use crate::services::application_service::{
    ApplicationError, ApplicationForm, ApplicationService, ApplicationStats,
    has_active_application,
};
use crate::validation::{validate_mobile, validate_non_empty, validate_positive_integer};

pub struct StoreApplicationService {
    store: Arc<dyn Persistence>,
}

impl StoreApplicationService {
    #[must_use]
    pub fn new(store: Arc<dyn Persistence>) -> Self {
        Self { store }
    }

    /// Checks the form in on-screen order and stops at the first problem.
    fn validate(
        username: &str,
        form: &ApplicationForm,
    ) -> Result<NewApplication, ApplicationError> {
        let name = validate_non_empty(&form.name, "Name")?;
        let mobile = validate_mobile(&form.mobile)?;
        let address = validate_non_empty(&form.address, "Address")?;
        let num_connections =
            validate_positive_integer(&form.num_connections, "Number of connections")?;

        Ok(NewApplication {
            applicant_username: username.to_string(),
            name: name.to_string(),
            mobile_no: mobile.to_string(),
            address: address.to_string(),
            num_connections,
            status: ApplicationStatus::Pending,
        })
    }
}

#[async_trait]
impl ApplicationService for StoreApplicationService {
    async fn create(
        &self,
        username: &str,
        form: &ApplicationForm,
    ) -> Result<ApplicationId, ApplicationError> {
        let new_application = Self::validate(username, form)?;

        // Check and insert are separate round-trips; concurrent submissions
        // by the same applicant are not serialised.
        let existing = self.store.list_applications_by_user(username).await?;
        if has_active_application(&existing) {
            debug!(applicant = %username, "Submission blocked by active application");
            return Err(ApplicationError::Blocked(username.to_string()));
        }

        let id = self.store.save_application(new_application).await?;
        info!(%id, applicant = %username, "Application submitted");
        Ok(id)
    }

    async fn list_by_user(&self, username: &str) -> Result<Vec<Application>, ApplicationError> {
        Ok(self.store.list_applications_by_user(username).await?)
    }

    async fn list_all(&self) -> Result<Vec<Application>, ApplicationError> {
        Ok(self.store.list_all_applications().await?)
    }

    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, ApplicationError> {
        let mut applications = self.store.list_all_applications().await?;
        applications.retain(|a| a.status == status);
        Ok(applications)
    }

    async fn get(&self, id: ApplicationId) -> Result<Application, ApplicationError> {
        self.store
            .find_application_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound(id))
    }

    async fn set_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, ApplicationError> {
        let mut application = self.get(id).await?;
        let previous = application.status;
        application.status = status;

        if !self.store.update_application(&application).await? {
            // Deleted between lookup and update
            return Err(ApplicationError::NotFound(id));
        }

        info!(%id, from = %previous, to = %status, "Application status changed");
        Ok(application)
    }

    async fn delete(&self, id: ApplicationId) -> Result<bool, ApplicationError> {
        let deleted = self.store.delete_application(id).await?;
        if deleted {
            info!(%id, "Application deleted");
        } else {
            debug!(%id, "Delete requested for missing application");
        }
        Ok(deleted)
    }

    async fn statistics(&self) -> Result<ApplicationStats, ApplicationError> {
        let users = self.store.list_users().await?;
        let applications = self.store.list_all_applications().await?;
        Ok(ApplicationStats::from_applications(users.len(), &applications))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::domain::{Role, User};
    use crate::validation::ValidationError;

    fn form(name: &str, mobile: &str, address: &str, connections: &str) -> ApplicationForm {
        ApplicationForm {
            name: name.to_string(),
            mobile: mobile.to_string(),
            address: address.to_string(),
            num_connections: connections.to_string(),
        }
    }

    fn valid_form() -> ApplicationForm {
        form("Alice A", "1234567890", "Addr", "3")
    }

    async fn service_with_alice() -> StoreApplicationService {
        let store = Arc::new(MemoryStore::seeded());
        store
            .register(User::new("alice", "pw1", Role::User))
            .await
            .unwrap();
        StoreApplicationService::new(store)
    }

    #[tokio::test]
    async fn create_assigns_id_and_pending_status() {
        let service = service_with_alice().await;
        let id = service.create("alice", &valid_form()).await.unwrap();

        let app = service.get(id).await.unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.applicant_username, "alice");
        assert_eq!(app.name, "Alice A");
        assert_eq!(app.num_connections, 3);
    }

    #[tokio::test]
    async fn second_request_while_pending_is_blocked() {
        let service = service_with_alice().await;
        service.create("alice", &valid_form()).await.unwrap();

        let err = service.create("alice", &valid_form()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Blocked(_)));
        assert_eq!(service.list_by_user("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn approved_request_also_blocks() {
        let service = service_with_alice().await;
        let id = service.create("alice", &valid_form()).await.unwrap();
        service
            .set_status(id, ApplicationStatus::Approved)
            .await
            .unwrap();

        assert!(matches!(
            service.create("alice", &valid_form()).await,
            Err(ApplicationError::Blocked(_))
        ));
    }

    #[tokio::test]
    async fn only_rejected_history_may_resubmit() {
        let service = service_with_alice().await;
        let first = service.create("alice", &valid_form()).await.unwrap();
        service
            .set_status(first, ApplicationStatus::Rejected)
            .await
            .unwrap();

        let second = service.create("alice", &valid_form()).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(
            service.get(second).await.unwrap().status,
            ApplicationStatus::Pending
        );
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_before_storage() {
        let service = service_with_alice().await;
        let cases = [
            form("", "1234567890", "Addr", "1"),
            form("Alice", "12345", "Addr", "1"),
            form("Alice", "1234567890", "   ", "1"),
            form("Alice", "1234567890", "Addr", "zero"),
            form("Alice", "1234567890", "Addr", "0"),
        ];

        for case in &cases {
            let err = service.create("alice", case).await.unwrap_err();
            assert!(matches!(err, ApplicationError::Validation(_)), "{case:?}");
        }
        assert!(service.list_by_user("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn name_and_address_are_stored_trimmed() {
        let service = service_with_alice().await;
        let id = service
            .create("alice", &form("  Alice A ", "1234567890", "\tAddr  ", "3"))
            .await
            .unwrap();

        let app = service.get(id).await.unwrap();
        assert_eq!(app.name, "Alice A");
        assert_eq!(app.address, "Addr");
    }

    #[tokio::test]
    async fn validation_reports_first_problem() {
        let service = service_with_alice().await;
        let err = service
            .create("alice", &form("", "bad", "", "-1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Validation(ValidationError::Empty { ref field }) if field == "Name"
        ));
    }

    #[tokio::test]
    async fn unknown_applicant_is_reported() {
        let service = service_with_alice().await;
        assert!(matches!(
            service.create("ghost", &valid_form()).await,
            Err(ApplicationError::UnknownApplicant(_))
        ));
    }

    #[tokio::test]
    async fn status_moves_freely() {
        let service = service_with_alice().await;
        let id = service.create("alice", &valid_form()).await.unwrap();

        for status in [
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Approved,
            ApplicationStatus::Approved,
            ApplicationStatus::Pending,
        ] {
            let updated = service.set_status(id, status).await.unwrap();
            assert_eq!(updated.status, status);
            assert_eq!(service.get(id).await.unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn set_status_on_missing_id_is_not_found() {
        let service = service_with_alice().await;
        let missing = ApplicationId::new(424_242);
        assert!(matches!(
            service.set_status(missing, ApplicationStatus::Approved).await,
            Err(ApplicationError::NotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn delete_then_find_and_delete_again() {
        let service = service_with_alice().await;
        let id = service.create("alice", &valid_form()).await.unwrap();

        assert!(service.delete(id).await.unwrap());
        assert!(matches!(
            service.get(id).await,
            Err(ApplicationError::NotFound(_))
        ));
        assert!(!service.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn filter_and_statistics() {
        let service = service_with_alice().await;
        let id = service.create("alice", &valid_form()).await.unwrap();
        service
            .set_status(id, ApplicationStatus::Approved)
            .await
            .unwrap();

        let approved = service
            .list_by_status(ApplicationStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, id);

        let pending = service
            .list_by_status(ApplicationStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].applicant_username, "user1");

        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_applications, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.approval_rate_display(), "50.0%");
    }
}
