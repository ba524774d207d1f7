//! Migration: Create resumes table and shared trigger function.
//!
//! Also creates the shared updated_at trigger function used by later tables.
//! The partial unique index on (user_id) WHERE is_active is the storage-level
//! backstop for the single-active-resume invariant.

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
                -- Shared trigger function for updated_at
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                -- Resumes table
                CREATE TABLE resumes (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL,
                    storage_key VARCHAR(512) NOT NULL,
                    original_filename VARCHAR(255) NOT NULL,
                    mime_type VARCHAR(100) NOT NULL
                        CHECK (mime_type IN (
                            'application/pdf',
                            'application/vnd.openxmlformats-officedocument.wordprocessingml.document'
                        )),
                    size_bytes BIGINT NOT NULL CHECK (size_bytes > 0),
                    is_active BOOLEAN NOT NULL DEFAULT FALSE,

                    -- Opaque parser output, stored verbatim
                    parsed_data JSONB NOT NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- At most one active resume per user
                CREATE UNIQUE INDEX idx_resumes_one_active_per_user
                    ON resumes(user_id) WHERE is_active;

                -- Index for listing a user's resumes
                CREATE INDEX idx_resumes_user_created_at
                    ON resumes(user_id, created_at DESC);
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
                DROP TABLE IF EXISTS resumes CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
