//! Migration: Create job_applications table.

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
                CREATE TABLE job_applications (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL,
                    job_title VARCHAR(255) NOT NULL,
                    company VARCHAR(255) NOT NULL,
                    application_date DATE NOT NULL,
                    status VARCHAR(20) NOT NULL DEFAULT 'applied'
                        CHECK (status IN ('applied', 'interview', 'offer', 'rejected', 'withdrawn', 'ghosted')),
                    follow_up_date DATE,
                    notes TEXT,
                    feedback TEXT,
                    match_score DOUBLE PRECISION
                        CHECK (match_score >= 0 AND match_score <= 1),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for listing a user's applications by date
                CREATE INDEX idx_job_applications_user_date
                    ON job_applications(user_id, application_date DESC);

                -- Index for status filtering
                CREATE INDEX idx_job_applications_user_status
                    ON job_applications(user_id, status);

                -- Index for follow-up reminders
                CREATE INDEX idx_job_applications_follow_up
                    ON job_applications(follow_up_date)
                    WHERE follow_up_date IS NOT NULL;

                -- Trigger to update updated_at
                CREATE TRIGGER update_job_applications_updated_at
                    BEFORE UPDATE ON job_applications
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
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
                DROP TRIGGER IF EXISTS update_job_applications_updated_at ON job_applications;
                DROP TABLE IF EXISTS job_applications CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
