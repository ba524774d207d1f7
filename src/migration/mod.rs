//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_resumes;
mod m20260601_000002_create_job_preferences;
mod m20260601_000003_create_job_applications;
mod m20260601_000004_create_company_ratings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_resumes::Migration),
            Box::new(m20260601_000002_create_job_preferences::Migration),
            Box::new(m20260601_000003_create_job_applications::Migration),
            Box::new(m20260601_000004_create_company_ratings::Migration),
        ]
    }
}
