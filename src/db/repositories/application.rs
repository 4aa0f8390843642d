use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Select, Set,
    SqlErr,
};
use tracing::info;

use crate::db::StorageError;
use crate::domain::{Application, ApplicationId, NewApplication};
use crate::entities::{applications, prelude::*};

/// Repository for connection requests
pub struct ApplicationRepository {
    conn: DatabaseConnection,
}

impl ApplicationRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_model(m: applications::Model) -> Result<Application, StorageError> {
        Ok(Application {
            id: ApplicationId::new(m.app_id),
            status: m.status.parse()?,
            applicant_username: m.applicant_username,
            name: m.name,
            mobile_no: m.mobile_no,
            address: m.address,
            num_connections: m.num_connections,
            created_at: Some(m.created_at),
        })
    }

    fn map_models(rows: Vec<applications::Model>) -> Result<Vec<Application>, StorageError> {
        rows.into_iter().map(Self::map_model).collect()
    }

    /// Newest first. Timestamps have one-second resolution, so ties fall back to id.
    fn newest_first(select: Select<Applications>) -> Select<Applications> {
        select
            .order_by_desc(applications::Column::CreatedAt)
            .order_by_desc(applications::Column::AppId)
    }

    // ========================================================================
    // Application Operations
    // ========================================================================

    pub async fn insert(&self, app: NewApplication) -> Result<ApplicationId, StorageError> {
        let applicant = app.applicant_username.clone();
        let active_model = applications::ActiveModel {
            app_id: NotSet,
            applicant_username: Set(app.applicant_username),
            name: Set(app.name),
            mobile_no: Set(app.mobile_no),
            address: Set(app.address),
            num_connections: Set(app.num_connections),
            status: Set(app.status.as_str().to_string()),
            created_at: NotSet,
        };

        let res = match Applications::insert(active_model).exec(&self.conn).await {
            Ok(res) => res,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                return Err(StorageError::UnknownApplicant(applicant));
            }
            Err(e) => return Err(e.into()),
        };

        let id = ApplicationId::new(res.last_insert_id);
        info!(%id, applicant = %applicant, "Inserted application");
        Ok(id)
    }

    pub async fn get(&self, id: ApplicationId) -> Result<Option<Application>, StorageError> {
        Applications::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn list_all(&self) -> Result<Vec<Application>, StorageError> {
        let rows = Self::newest_first(Applications::find())
            .all(&self.conn)
            .await?;
        Self::map_models(rows)
    }

    pub async fn list_for_applicant(&self, username: &str) -> Result<Vec<Application>, StorageError> {
        let rows = Self::newest_first(
            Applications::find().filter(applications::Column::ApplicantUsername.eq(username)),
        )
        .all(&self.conn)
        .await?;
        Self::map_models(rows)
    }

    /// Overwrites the mutable columns. Applicant and creation time never change.
    pub async fn update(&self, app: &Application) -> Result<bool, StorageError> {
        let result = Applications::update_many()
            .col_expr(applications::Column::Name, Expr::value(app.name.clone()))
            .col_expr(
                applications::Column::MobileNo,
                Expr::value(app.mobile_no.clone()),
            )
            .col_expr(applications::Column::Address, Expr::value(app.address.clone()))
            .col_expr(
                applications::Column::NumConnections,
                Expr::value(app.num_connections),
            )
            .col_expr(applications::Column::Status, Expr::value(app.status.as_str()))
            .filter(applications::Column::AppId.eq(app.id.value()))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove(&self, id: ApplicationId) -> Result<bool, StorageError> {
        let result = Applications::delete_by_id(id.value())
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
