//! Database queries for job applications.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, Statement,
};
use uuid::Uuid;

use crate::entity::job_application::{self, ActiveModel, Entity as Application};
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplicationStatus, CreateJobApplicationRequest, ListApplicationsQuery,
    UpdateJobApplicationRequest,
};

use super::DbPool;

/// Per-user application count, used by the digest jobs.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserApplicationCount {
    pub user_id: Uuid,
    pub count: i64,
}

/// Per-user, per-status application count for the weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserStatusCount {
    pub user_id: Uuid,
    pub status: String,
    pub count: i64,
}

impl DbPool {
    /// Insert a new job application.
    pub async fn insert_application(
        &self,
        user_id: Uuid,
        request: &CreateJobApplicationRequest,
    ) -> AppResult<job_application::Model> {
        let now = Utc::now();
        let status = request.status.unwrap_or(ApplicationStatus::Applied);

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            job_title: Set(request.job_title.trim().to_string()),
            company: Set(request.company.trim().to_string()),
            application_date: Set(request.application_date),
            status: Set(status.as_str().to_string()),
            follow_up_date: Set(request.follow_up_date),
            notes: Set(request.notes.clone()),
            feedback: Set(request.feedback.clone()),
            match_score: Set(request.match_score),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert application: {}", e)))?;

        Ok(inserted)
    }

    /// Get one of the user's applications by ID.
    pub async fn get_application(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<job_application::Model>> {
        let found = Application::find_by_id(id)
            .filter(job_application::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get application: {}", e)))?;

        Ok(found)
    }

    /// List the user's applications with optional filtering and pagination.
    pub async fn list_applications(
        &self,
        user_id: Uuid,
        query: &ListApplicationsQuery,
    ) -> AppResult<(Vec<job_application::Model>, u64)> {
        let mut select = Application::find().filter(job_application::Column::UserId.eq(user_id));

        if let Some(status) = query.status {
            select = select.filter(job_application::Column::Status.eq(status.as_str()));
        }

        if let Some(ref company) = query.company {
            select = select.filter(job_application::Column::Company.eq(company.as_str()));
        }

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count applications: {}", e)))?;

        let limit = query.limit.clamp(1, 100) as u64;
        let offset = query.offset.max(0) as u64;

        let applications = select
            .order_by_desc(job_application::Column::ApplicationDate)
            .order_by_desc(job_application::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list applications: {}", e)))?;

        Ok((applications, total))
    }

    /// Update one of the user's applications in place.
    pub async fn update_application(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &UpdateJobApplicationRequest,
    ) -> AppResult<job_application::Model> {
        let existing = self
            .get_application(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job application {}", id)))?;

        let mut active: ActiveModel = existing.into();

        if let Some(ref job_title) = patch.job_title {
            active.job_title = Set(job_title.trim().to_string());
        }
        if let Some(ref company) = patch.company {
            active.company = Set(company.trim().to_string());
        }
        if let Some(application_date) = patch.application_date {
            active.application_date = Set(application_date);
        }
        if let Some(status) = patch.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(follow_up_date) = patch.follow_up_date {
            active.follow_up_date = Set(Some(follow_up_date));
        }
        if let Some(ref notes) = patch.notes {
            active.notes = Set(Some(notes.clone()));
        }
        if let Some(ref feedback) = patch.feedback {
            active.feedback = Set(Some(feedback.clone()));
        }
        if let Some(match_score) = patch.match_score {
            active.match_score = Set(Some(match_score));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update application: {}", e)))?;

        Ok(updated)
    }

    /// Delete one of the user's applications.
    pub async fn delete_application(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = Application::delete_many()
            .filter(job_application::Column::Id.eq(id))
            .filter(job_application::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete application: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Job application {}", id)));
        }

        Ok(())
    }

    /// Count applications logged since `since`, grouped by user.
    pub async fn applications_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<UserApplicationCount>> {
        let rows = UserApplicationCount::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT user_id, COUNT(*) AS count FROM job_applications \
             WHERE created_at >= $1 GROUP BY user_id",
            [since.into()],
        ))
        .all(self.connection())
        .await
        .map_err(|e| AppError::Database(format!("Failed to count recent applications: {}", e)))?;

        Ok(rows)
    }

    /// Count applications logged since `since`, grouped by user and status.
    pub async fn status_counts_since(
        &self,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<UserStatusCount>> {
        let rows = UserStatusCount::find_by_statement(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT user_id, status, COUNT(*) AS count FROM job_applications \
             WHERE created_at >= $1 GROUP BY user_id, status",
            [since.into()],
        ))
        .all(self.connection())
        .await
        .map_err(|e| AppError::Database(format!("Failed to count statuses: {}", e)))?;

        Ok(rows)
    }

    /// Applications with a follow-up due in the given date window.
    pub async fn follow_ups_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<job_application::Model>> {
        let applications = Application::find()
            .filter(job_application::Column::FollowUpDate.gte(start))
            .filter(job_application::Column::FollowUpDate.lte(end))
            .order_by_asc(job_application::Column::FollowUpDate)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list follow-ups: {}", e)))?;

        Ok(applications)
    }
}
