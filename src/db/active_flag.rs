//! Single-active-row enforcement for user-scoped resources.
//!
//! Resumes and job preferences share the same rule: for a given user, at
//! most one row may be active at a time. Every transition runs as one
//! database transaction - lock the target row, clear any other active row,
//! mark the target active. A partial unique index on (user_id) WHERE
//! is_active backs the invariant at the storage level; a conflict on that
//! index means a concurrent writer won the race, and the operation is
//! retried once before surfacing as transient.
//!
//! Active-flag state is never cached in memory across requests; every
//! activation and every read goes to the store.

use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, SqlErr, Statement, TransactionTrait};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::DbPool;

/// Resource tables governed by the single-active invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveResource {
    Resume,
    JobPreference,
}

impl ActiveResource {
    /// Table name the invariant is scoped to.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Resume => "resumes",
            Self::JobPreference => "job_preferences",
        }
    }

    /// Human-readable resource name for error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::JobPreference => "Job preference",
        }
    }
}

/// Map a database error from an activation step, turning unique-index
/// violations into retryable conflicts.
pub(crate) fn map_activation_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Concurrent activation detected".to_string())
        }
        _ => AppError::Database(format!("Activation failed: {}", err)),
    }
}

/// Clear the active flag on every active row the user owns.
///
/// Used inside create/update transactions before inserting a new active
/// row. Returns the number of rows deactivated.
pub(crate) async fn deactivate_current<C>(
    conn: &C,
    resource: ActiveResource,
    user_id: Uuid,
) -> AppResult<u64>
where
    C: ConnectionTrait,
{
    let result = conn
        .execute_raw(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "UPDATE {} SET is_active = FALSE WHERE user_id = $1 AND is_active",
                resource.table()
            ),
            [user_id.into()],
        ))
        .await
        .map_err(map_activation_err)?;

    Ok(result.rows_affected())
}

impl DbPool {
    /// Make `target_id` the user's single active row for `resource`.
    ///
    /// Fails with NotFound when the target does not exist or belongs to
    /// another user; in that case nothing is mutated. Activating the
    /// already-active row leaves state unchanged. A lost race against a
    /// concurrent activation is retried once, then surfaced as a conflict.
    pub async fn activate(
        &self,
        user_id: Uuid,
        resource: ActiveResource,
        target_id: Uuid,
    ) -> AppResult<()> {
        match self.try_activate(user_id, resource, target_id).await {
            Err(AppError::Conflict(_)) => self.try_activate(user_id, resource, target_id).await,
            result => result,
        }
    }

    async fn try_activate(
        &self,
        user_id: Uuid,
        resource: ActiveResource,
        target_id: Uuid,
    ) -> AppResult<()> {
        let table = resource.table();

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(map_activation_err)?;

        // Lock the target row for the duration of the transaction and
        // verify ownership in the same step.
        let target = txn
            .query_one_raw(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                format!(
                    "SELECT id FROM {} WHERE id = $1 AND user_id = $2 FOR UPDATE",
                    table
                ),
                [target_id.into(), user_id.into()],
            ))
            .await
            .map_err(map_activation_err)?;

        if target.is_none() {
            // Dropping the transaction rolls it back; nothing was mutated.
            return Err(AppError::NotFound(format!(
                "{} {}",
                resource.label(),
                target_id
            )));
        }

        // Clear any other active row for this user...
        txn.execute_raw(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!(
                "UPDATE {} SET is_active = FALSE WHERE user_id = $1 AND is_active AND id <> $2",
                table
            ),
            [user_id.into(), target_id.into()],
        ))
        .await
        .map_err(map_activation_err)?;

        // ...then mark the target active. Idempotent when it already is.
        txn.execute_raw(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            format!("UPDATE {} SET is_active = TRUE WHERE id = $1", table),
            [target_id.into()],
        ))
        .await
        .map_err(map_activation_err)?;

        txn.commit().await.map_err(map_activation_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_table_mapping() {
        assert_eq!(ActiveResource::Resume.table(), "resumes");
        assert_eq!(ActiveResource::JobPreference.table(), "job_preferences");
    }

    #[test]
    fn test_resource_labels() {
        assert_eq!(ActiveResource::Resume.label(), "Resume");
        assert_eq!(ActiveResource::JobPreference.label(), "Job preference");
    }
}
