//! Migration: Create job_preferences table.
//!
//! Preference rows form an append-only version history per user; the active
//! row is the current preference. Same partial-unique-index backstop as
//! resumes.

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
                CREATE TABLE job_preferences (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL,
                    title VARCHAR(255) NOT NULL,
                    industry VARCHAR(255),
                    location VARCHAR(255),
                    work_mode VARCHAR(20)
                        CHECK (work_mode IN ('remote', 'hybrid', 'onsite')),
                    min_salary BIGINT CHECK (min_salary >= 0),
                    max_salary BIGINT CHECK (max_salary >= 0),
                    company_size VARCHAR(20)
                        CHECK (company_size IN ('startup', 'small', 'medium', 'large', 'enterprise')),

                    -- Ordered search keywords as a JSONB string array
                    keywords JSONB NOT NULL DEFAULT '[]',

                    is_active BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    CHECK (min_salary IS NULL OR max_salary IS NULL OR max_salary >= min_salary)
                );

                -- At most one active preference per user
                CREATE UNIQUE INDEX idx_job_preferences_one_active_per_user
                    ON job_preferences(user_id) WHERE is_active;

                -- Index for listing a user's preference history
                CREATE INDEX idx_job_preferences_user_created_at
                    ON job_preferences(user_id, created_at DESC);

                -- Trigger to update updated_at
                CREATE TRIGGER update_job_preferences_updated_at
                    BEFORE UPDATE ON job_preferences
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
                DROP TRIGGER IF EXISTS update_job_preferences_updated_at ON job_preferences;
                DROP TABLE IF EXISTS job_preferences CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
