//! Database queries for job preferences.
//!
//! Preference history is append-only. Creation inserts an active row;
//! updates deactivate the prior version and insert a fresh row carrying the
//! merged fields. Deactivated versions are never mutated.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::job_preference::{self, ActiveModel, Entity as Preference};
use crate::error::{AppError, AppResult};
use crate::models::{CreateJobPreferenceRequest, UpdateJobPreferenceRequest};

use super::active_flag::{self, ActiveResource};
use super::DbPool;

impl DbPool {
    /// Insert a new job preference as the user's active preference.
    pub async fn insert_preference_as_active(
        &self,
        user_id: Uuid,
        request: &CreateJobPreferenceRequest,
    ) -> AppResult<job_preference::Model> {
        match self.try_insert_preference(user_id, request).await {
            Err(AppError::Conflict(_)) => self.try_insert_preference(user_id, request).await,
            result => result,
        }
    }

    async fn try_insert_preference(
        &self,
        user_id: Uuid,
        request: &CreateJobPreferenceRequest,
    ) -> AppResult<job_preference::Model> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(active_flag::map_activation_err)?;

        active_flag::deactivate_current(&txn, ActiveResource::JobPreference, user_id).await?;

        let now = Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            title: Set(request.title.trim().to_string()),
            industry: Set(request.industry.clone()),
            location: Set(request.location.clone()),
            work_mode: Set(request.work_mode.map(|m| m.as_str().to_string())),
            min_salary: Set(request.min_salary),
            max_salary: Set(request.max_salary),
            company_size: Set(request.company_size.map(|s| s.as_str().to_string())),
            keywords: Set(serde_json::json!(request.keywords)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(active_flag::map_activation_err)?;

        txn.commit()
            .await
            .map_err(active_flag::map_activation_err)?;

        Ok(inserted)
    }

    /// Versioned update: deactivate the prior version and insert a new row
    /// carrying its fields overlaid with the patch.
    ///
    /// The prior row keeps its field values and stays queryable in history.
    /// An empty patch still produces a new identical-content version.
    pub async fn update_preference_versioned(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &UpdateJobPreferenceRequest,
    ) -> AppResult<job_preference::Model> {
        match self.try_update_preference(user_id, id, patch).await {
            Err(AppError::Conflict(_)) => self.try_update_preference(user_id, id, patch).await,
            result => result,
        }
    }

    async fn try_update_preference(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &UpdateJobPreferenceRequest,
    ) -> AppResult<job_preference::Model> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(active_flag::map_activation_err)?;

        // Lock the prior version so a concurrent update serializes behind us.
        let prior = Preference::find_by_id(id)
            .filter(job_preference::Column::UserId.eq(user_id))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(active_flag::map_activation_err)?
            .ok_or_else(|| AppError::NotFound(format!("Job preference {}", id)))?;

        // Clears every active row the user owns, the prior version included.
        active_flag::deactivate_current(&txn, ActiveResource::JobPreference, user_id).await?;

        let now = Utc::now();
        let next = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            title: Set(patch
                .title
                .as_deref()
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| prior.title.clone())),
            industry: Set(patch.industry.clone().or_else(|| prior.industry.clone())),
            location: Set(patch.location.clone().or_else(|| prior.location.clone())),
            work_mode: Set(patch
                .work_mode
                .map(|m| m.as_str().to_string())
                .or_else(|| prior.work_mode.clone())),
            min_salary: Set(patch.min_salary.or(prior.min_salary)),
            max_salary: Set(patch.max_salary.or(prior.max_salary)),
            company_size: Set(patch
                .company_size
                .map(|s| s.as_str().to_string())
                .or_else(|| prior.company_size.clone())),
            keywords: Set(match &patch.keywords {
                Some(keywords) => serde_json::json!(keywords),
                None => prior.keywords.clone(),
            }),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = next
            .insert(&txn)
            .await
            .map_err(active_flag::map_activation_err)?;

        txn.commit()
            .await
            .map_err(active_flag::map_activation_err)?;

        Ok(inserted)
    }

    /// List all of the user's preference versions, newest first.
    pub async fn list_preferences(&self, user_id: Uuid) -> AppResult<Vec<job_preference::Model>> {
        let preferences = Preference::find()
            .filter(job_preference::Column::UserId.eq(user_id))
            .order_by_desc(job_preference::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list job preferences: {}", e)))?;

        Ok(preferences)
    }

    /// Get one of the user's preference versions by ID.
    pub async fn get_preference(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<job_preference::Model>> {
        let found = Preference::find_by_id(id)
            .filter(job_preference::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get job preference: {}", e)))?;

        Ok(found)
    }

    /// Get the user's active preference, if any.
    pub async fn get_active_preference(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<job_preference::Model>> {
        let found = Preference::find()
            .filter(job_preference::Column::UserId.eq(user_id))
            .filter(job_preference::Column::IsActive.eq(true))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get active preference: {}", e)))?;

        Ok(found)
    }

    /// Hard-delete one preference version.
    ///
    /// Deleting the active version leaves the user with no active
    /// preference; another version becomes active only through an explicit
    /// activation.
    pub async fn delete_preference(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = Preference::delete_many()
            .filter(job_preference::Column::Id.eq(id))
            .filter(job_preference::Column::UserId.eq(user_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete job preference: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Job preference {}", id)));
        }

        Ok(())
    }
}
