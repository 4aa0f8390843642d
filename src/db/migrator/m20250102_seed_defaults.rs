use crate::constants::seed;
use crate::entities::{applications, prelude::*, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, PaginatorTrait};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let insert_users = Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Username,
                users::Column::Password,
                users::Column::Role,
            ])
            .values_panic([
                seed::ADMIN_USERNAME.into(),
                seed::ADMIN_PASSWORD.into(),
                "ADMIN".into(),
            ])
            .values_panic([
                seed::USER_USERNAME.into(),
                seed::USER_PASSWORD.into(),
                "USER".into(),
            ])
            .on_conflict(
                OnConflict::column(users::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        manager.exec_stmt(insert_users).await?;

        // Sample request only for an empty table
        let existing = Applications::find().count(manager.get_connection()).await?;
        if existing == 0 {
            let insert_sample = Query::insert()
                .into_table(Applications)
                .columns([
                    applications::Column::ApplicantUsername,
                    applications::Column::Name,
                    applications::Column::MobileNo,
                    applications::Column::Address,
                    applications::Column::NumConnections,
                    applications::Column::Status,
                ])
                .values_panic([
                    seed::USER_USERNAME.into(),
                    seed::SAMPLE_NAME.into(),
                    seed::SAMPLE_MOBILE.into(),
                    seed::SAMPLE_ADDRESS.into(),
                    seed::SAMPLE_CONNECTIONS.into(),
                    "PENDING".into(),
                ])
                .to_owned();

            manager.exec_stmt(insert_sample).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete_sample = Query::delete()
            .from_table(Applications)
            .and_where(Expr::col(applications::Column::ApplicantUsername).eq(seed::USER_USERNAME))
            .and_where(Expr::col(applications::Column::Name).eq(seed::SAMPLE_NAME))
            .to_owned();
        manager.exec_stmt(delete_sample).await?;

        let delete_users = Query::delete()
            .from_table(Users)
            .and_where(
                Expr::col(users::Column::Username)
                    .is_in([seed::ADMIN_USERNAME, seed::USER_USERNAME]),
            )
            .to_owned();
        manager.exec_stmt(delete_users).await?;

        Ok(())
    }
}
