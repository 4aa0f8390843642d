use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};

use crate::db::StorageError;
use crate::domain::User;
use crate::entities::{prelude::*, users};

impl TryFrom<users::Model> for User {
    type Error = StorageError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: model.role.parse()?,
            username: model.username,
            password: model.password,
        })
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Users::find_by_id(username.to_string())
            .one(&self.conn)
            .await?
            .map(User::try_from)
            .transpose()
    }

    /// Both columns compare with SQLite's default binary collation, so the match is case-sensitive.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StorageError> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Password.eq(password))
            .one(&self.conn)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub async fn insert(&self, user: User) -> Result<(), StorageError> {
        if self.get_by_username(&user.username).await?.is_some() {
            return Err(StorageError::Conflict(user.username));
        }

        let active_model = users::ActiveModel {
            username: Set(user.username.clone()),
            password: Set(user.password),
            role: Set(user.role.as_str().to_string()),
        };

        match Users::insert(active_model)
            .exec_without_returning(&self.conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(StorageError::Conflict(user.username))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        Users::find()
            .order_by_asc(users::Column::Username)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}
