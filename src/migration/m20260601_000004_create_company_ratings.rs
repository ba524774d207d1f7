//! Migration: Create company_ratings table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE company_ratings (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL,
                    job_application_id UUID
                        REFERENCES job_applications(id) ON DELETE SET NULL,
                    company_name VARCHAR(255) NOT NULL,
                    overall_rating SMALLINT NOT NULL
                        CHECK (overall_rating BETWEEN 1 AND 5),
                    interview_process_rating SMALLINT
                        CHECK (interview_process_rating BETWEEN 1 AND 5),
                    work_life_balance_rating SMALLINT
                        CHECK (work_life_balance_rating BETWEEN 1 AND 5),
                    compensation_rating SMALLINT
                        CHECK (compensation_rating BETWEEN 1 AND 5),
                    career_growth_rating SMALLINT
                        CHECK (career_growth_rating BETWEEN 1 AND 5),
                    review TEXT,
                    pros TEXT,
                    cons TEXT,
                    anonymous BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Company statistics group by exact (case-sensitive) name
                CREATE INDEX idx_company_ratings_company_name
                    ON company_ratings(company_name);

                -- Index for a user's own ratings
                CREATE INDEX idx_company_ratings_user_created_at
                    ON company_ratings(user_id, created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS company_ratings CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
