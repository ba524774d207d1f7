//! Database queries for resumes.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::entity::resume::{self, ActiveModel, Entity as Resume};
use crate::error::{AppError, AppResult};

use super::active_flag::{self, ActiveResource};
use super::DbPool;

impl DbPool {
    /// Insert a new resume as the user's active resume.
    ///
    /// The previously active resume (if any) is deactivated in the same
    /// transaction; a lost race against a concurrent insert is retried once.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_resume_as_active(
        &self,
        id: Uuid,
        user_id: Uuid,
        storage_key: &str,
        original_filename: &str,
        mime_type: &str,
        size_bytes: i64,
        parsed_data: JsonValue,
    ) -> AppResult<resume::Model> {
        let attempt = self
            .try_insert_resume_as_active(
                id,
                user_id,
                storage_key,
                original_filename,
                mime_type,
                size_bytes,
                parsed_data.clone(),
            )
            .await;

        match attempt {
            Err(AppError::Conflict(_)) => {
                self.try_insert_resume_as_active(
                    id,
                    user_id,
                    storage_key,
                    original_filename,
                    mime_type,
                    size_bytes,
                    parsed_data,
                )
                .await
            }
            result => result,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn try_insert_resume_as_active(
        &self,
        id: Uuid,
        user_id: Uuid,
        storage_key: &str,
        original_filename: &str,
        mime_type: &str,
        size_bytes: i64,
        parsed_data: JsonValue,
    ) -> AppResult<resume::Model> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(active_flag::map_activation_err)?;

        active_flag::deactivate_current(&txn, ActiveResource::Resume, user_id).await?;

        let model = ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            storage_key: Set(storage_key.to_string()),
            original_filename: Set(original_filename.to_string()),
            mime_type: Set(mime_type.to_string()),
            size_bytes: Set(size_bytes),
            is_active: Set(true),
            parsed_data: Set(parsed_data),
            created_at: Set(Utc::now()),
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

    /// List the user's resumes, newest first.
    pub async fn list_resumes(&self, user_id: Uuid) -> AppResult<Vec<resume::Model>> {
        let resumes = Resume::find()
            .filter(resume::Column::UserId.eq(user_id))
            .order_by_desc(resume::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list resumes: {}", e)))?;

        Ok(resumes)
    }

    /// Get one of the user's resumes by ID.
    pub async fn get_resume(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<resume::Model>> {
        let found = Resume::find_by_id(id)
            .filter(resume::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get resume: {}", e)))?;

        Ok(found)
    }

    /// Get the user's active resume, if any.
    pub async fn get_active_resume(&self, user_id: Uuid) -> AppResult<Option<resume::Model>> {
        let found = Resume::find()
            .filter(resume::Column::UserId.eq(user_id))
            .filter(resume::Column::IsActive.eq(true))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get active resume: {}", e)))?;

        Ok(found)
    }

    /// Hard-delete one of the user's resumes.
    ///
    /// Returns the deleted row so the caller can clean up the blob.
    pub async fn delete_resume(&self, user_id: Uuid, id: Uuid) -> AppResult<resume::Model> {
        let found = self
            .get_resume(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {}", id)))?;

        Resume::delete_by_id(found.id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete resume: {}", e)))?;

        Ok(found)
    }
}
