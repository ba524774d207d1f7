//! Resume DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::resume;

/// MIME types accepted for resume uploads.
pub const ACCEPTED_RESUME_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Resume response body.
///
/// The storage key is internal and never exposed to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResumeResponse {
    /// Resume UUID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Original upload filename.
    pub original_filename: String,
    /// MIME type of the uploaded file.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Whether this is the user's active resume.
    pub is_active: bool,
    /// Structured data returned by the parsing service, stored verbatim.
    pub parsed_data: JsonValue,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<resume::Model> for ResumeResponse {
    fn from(m: resume::Model) -> Self {
        ResumeResponse {
            id: m.id,
            user_id: m.user_id,
            original_filename: m.original_filename,
            mime_type: m.mime_type,
            size_bytes: m.size_bytes,
            is_active: m.is_active,
            parsed_data: m.parsed_data,
            created_at: m.created_at,
        }
    }
}

/// Resume list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResumeListResponse {
    /// The caller's resumes, newest first.
    pub resumes: Vec<ResumeResponse>,
}
