//! Job preference entity.
//!
//! Preference history is append-only: updates insert a new row and flip the
//! prior row's `is_active` flag. Deactivated rows are never mutated.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub work_mode: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub company_size: Option<String>,
    /// Ordered list of search keywords, stored as a JSONB string array.
    #[sea_orm(column_type = "JsonBinary")]
    pub keywords: JsonValue,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
