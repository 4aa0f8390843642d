use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string_len(100).not_null())
                    .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::AppId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Applications::ApplicantUsername)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Applications::MobileNo)
                            .string_len(15)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::Address).text().not_null())
                    .col(
                        ColumnDef::new(Applications::NumConnections)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .date_time()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_owned()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_applicant_username")
                            .from(Applications::Table, Applications::ApplicantUsername)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // Listings filter by applicant and sort newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_applicant_username")
                    .table(Applications::Table)
                    .col(Applications::ApplicantUsername)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_created_at")
                    .table(Applications::Table)
                    .col(Applications::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Username,
    Password,
    Role,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    AppId,
    ApplicantUsername,
    Name,
    MobileNo,
    Address,
    NumConnections,
    Status,
    CreatedAt,
}
