use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{Application, ApplicationId, NewApplication, User};

pub mod memory;
pub mod migrator;
pub mod provider;
pub mod repositories;

pub use memory::MemoryStore;
pub use provider::{BackendKind, Persistence, StorageError, open};

/// Durable backend over SQLite. Migrations create the schema and seed defaults on first run.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 1, 0).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn application_repo(&self) -> repositories::application::ApplicationRepository {
        repositories::application::ApplicationRepository::new(self.conn.clone())
    }
}

#[async_trait]
impl Persistence for Store {
    fn kind(&self) -> BackendKind {
        BackendKind::Durable
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StorageError> {
        self.user_repo()
            .find_by_credentials(username, password)
            .await
    }

    async fn register(&self, user: User) -> Result<(), StorageError> {
        self.user_repo().insert(user).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.user_repo().list_all().await
    }

    async fn save_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationId, StorageError> {
        self.application_repo().insert(application).await
    }

    async fn list_all_applications(&self) -> Result<Vec<Application>, StorageError> {
        self.application_repo().list_all().await
    }

    async fn find_application_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<Application>, StorageError> {
        self.application_repo().get(id).await
    }

    async fn list_applications_by_user(
        &self,
        username: &str,
    ) -> Result<Vec<Application>, StorageError> {
        self.application_repo().list_for_applicant(username).await
    }

    async fn update_application(&self, application: &Application) -> Result<bool, StorageError> {
        self.application_repo().update(application).await
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<bool, StorageError> {
        self.application_repo().remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationStatus, Role};

    async fn temp_store() -> Store {
        let db_path =
            std::env::temp_dir().join(format!("lpg-store-test-{}.db", uuid::Uuid::new_v4()));
        Store::new(&format!("sqlite:{}", db_path.display()))
            .await
            .expect("failed to open test database")
    }

    fn request(username: &str, name: &str) -> NewApplication {
        NewApplication {
            applicant_username: username.to_string(),
            name: name.to_string(),
            mobile_no: "1234567890".to_string(),
            address: "Addr".to_string(),
            num_connections: 2,
            status: ApplicationStatus::Pending,
        }
    }

    #[tokio::test]
    async fn first_run_seeds_defaults() {
        let store = temp_store().await;
        store.ping().await.unwrap();

        let users = store.list_users().await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["admin", "user1"]);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[1].role, Role::User);

        let apps = store.list_all_applications().await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].applicant_username, "user1");
        assert_eq!(apps[0].name, "Priya Sharma");
        assert_eq!(apps[0].status, ApplicationStatus::Pending);
        assert!(apps[0].created_at.is_some());
    }

    #[tokio::test]
    async fn reopening_does_not_reseed() {
        let db_path =
            std::env::temp_dir().join(format!("lpg-store-test-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite:{}", db_path.display());

        let first = Store::new(&url).await.unwrap();
        first.delete_application(ApplicationId::new(1)).await.unwrap();
        drop(first);

        let second = Store::new(&url).await.unwrap();
        assert!(second.list_all_applications().await.unwrap().is_empty());
        assert_eq!(second.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn authenticate_is_exact_and_case_sensitive() {
        let store = temp_store().await;

        assert!(store.authenticate("admin", "admin123").await.unwrap().is_some());
        assert!(store.authenticate("Admin", "admin123").await.unwrap().is_none());
        assert!(store.authenticate("admin", "ADMIN123").await.unwrap().is_none());
        assert!(store.authenticate("nobody", "admin123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_conflict_is_reported() {
        let store = temp_store().await;
        store
            .register(User::new("alice", "pw1", Role::User))
            .await
            .unwrap();

        let err = store
            .register(User::new("alice", "pw2", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        assert!(store.authenticate("alice", "pw1").await.unwrap().is_some());
        assert!(store.authenticate("alice", "pw2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let store = temp_store().await;
        store
            .register(User::new("alice", "pw1", Role::User))
            .await
            .unwrap();

        let first = store.save_application(request("alice", "First")).await.unwrap();
        let second = store.save_application(request("alice", "Second")).await.unwrap();
        assert!(second > first);

        let mine = store.list_applications_by_user("alice").await.unwrap();
        let ids: Vec<_> = mine.iter().map(|a| a.id).collect();
        assert_eq!(ids, [second, first]);

        let all = store.list_all_applications().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, second);
    }

    #[tokio::test]
    async fn application_requires_existing_applicant() {
        let store = temp_store().await;
        let err = store
            .save_application(request("ghost", "Nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UnknownApplicant(_)));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let store = temp_store().await;
        let mut app = store.list_all_applications().await.unwrap().remove(0);

        app.status = ApplicationStatus::Rejected;
        app.address = "456, Side St.".to_string();
        assert!(store.update_application(&app).await.unwrap());

        let stored = store.find_application_by_id(app.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ApplicationStatus::Rejected);
        assert_eq!(stored.address, "456, Side St.");
        assert_eq!(stored.applicant_username, "user1");

        assert!(store.delete_application(app.id).await.unwrap());
        assert!(store.find_application_by_id(app.id).await.unwrap().is_none());
        assert!(!store.delete_application(app.id).await.unwrap());
        assert!(!store.update_application(&app).await.unwrap());
    }
}
