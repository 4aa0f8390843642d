use sea_orm_migration::prelude::*;

mod m20250101_create_users_and_applications;
mod m20250102_seed_defaults;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_create_users_and_applications::Migration),
            Box::new(m20250102_seed_defaults::Migration),
        ]
    }
}
