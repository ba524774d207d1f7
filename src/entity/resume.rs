//! Resume entity.
//!
//! At most one row per user may have `is_active = true`; the invariant is
//! enforced transactionally in `db::active_flag` and backed by a partial
//! unique index on (user_id) WHERE is_active.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resumes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub storage_key: String,
    pub original_filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub is_active: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub parsed_data: JsonValue,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
