//! Job preference DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::job_preference;
use crate::error::{AppError, AppResult};

/// Preferred work mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Hybrid => "hybrid",
            Self::Onsite => "onsite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "remote" => Some(Self::Remote),
            "hybrid" => Some(Self::Hybrid),
            "onsite" => Some(Self::Onsite),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preferred company size bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "startup" => Some(Self::Startup),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for creating a job preference.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateJobPreferenceRequest {
    /// Desired job title.
    pub title: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_mode: Option<WorkMode>,
    #[serde(default)]
    pub min_salary: Option<i64>,
    #[serde(default)]
    pub max_salary: Option<i64>,
    #[serde(default)]
    pub company_size: Option<CompanySize>,
    /// Ordered search keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CreateJobPreferenceRequest {
    /// Validate the request before any store write.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Missing required field: title".to_string(),
            ));
        }
        validate_salary_range(self.min_salary, self.max_salary)
    }
}

/// Patch body for a versioned preference update.
///
/// Absent fields keep the prior version's value; the patch cannot clear an
/// optional field back to null. An empty patch still creates a new version.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateJobPreferenceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_mode: Option<WorkMode>,
    #[serde(default)]
    pub min_salary: Option<i64>,
    #[serde(default)]
    pub max_salary: Option<i64>,
    #[serde(default)]
    pub company_size: Option<CompanySize>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl UpdateJobPreferenceRequest {
    /// Validate the patch fields that can be checked without the prior row.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref title) = self.title
            && title.trim().is_empty()
        {
            return Err(AppError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }
        validate_salary_range(self.min_salary, self.max_salary)
    }
}

fn validate_salary_range(min: Option<i64>, max: Option<i64>) -> AppResult<()> {
    if let Some(s) = min
        && s < 0
    {
        return Err(AppError::InvalidInput(
            "min_salary must not be negative".to_string(),
        ));
    }
    if let Some(s) = max
        && s < 0
    {
        return Err(AppError::InvalidInput(
            "max_salary must not be negative".to_string(),
        ));
    }
    if let (Some(lo), Some(hi)) = (min, max)
        && hi < lo
    {
        return Err(AppError::InvalidInput(
            "max_salary must be greater than or equal to min_salary".to_string(),
        ));
    }
    Ok(())
}

/// Job preference response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobPreferenceResponse {
    /// Preference version UUID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<WorkMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<CompanySize>,
    /// Ordered search keywords.
    pub keywords: Vec<String>,
    /// Whether this version is the user's current preference.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<job_preference::Model> for JobPreferenceResponse {
    fn from(m: job_preference::Model) -> Self {
        // Stored by this server as a string array; tolerate anything else.
        let keywords: Vec<String> = serde_json::from_value(m.keywords).unwrap_or_default();

        JobPreferenceResponse {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            industry: m.industry,
            location: m.location,
            work_mode: m.work_mode.as_deref().and_then(WorkMode::parse),
            min_salary: m.min_salary,
            max_salary: m.max_salary,
            company_size: m.company_size.as_deref().and_then(CompanySize::parse),
            keywords,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Job preference history response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobPreferenceListResponse {
    /// All preference versions, newest first.
    pub preferences: Vec<JobPreferenceResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_mode_round_trip() {
        for mode in [WorkMode::Remote, WorkMode::Hybrid, WorkMode::Onsite] {
            assert_eq!(WorkMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(WorkMode::parse("office"), None);
    }

    #[test]
    fn test_company_size_round_trip() {
        for size in [
            CompanySize::Startup,
            CompanySize::Small,
            CompanySize::Medium,
            CompanySize::Large,
            CompanySize::Enterprise,
        ] {
            assert_eq!(CompanySize::parse(size.as_str()), Some(size));
        }
        assert_eq!(CompanySize::parse("huge"), None);
    }

    #[test]
    fn test_create_request_requires_title() {
        let req = CreateJobPreferenceRequest {
            title: "  ".to_string(),
            industry: None,
            location: None,
            work_mode: None,
            min_salary: None,
            max_salary: None,
            company_size: None,
            keywords: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_salary_range_validation() {
        let mut req = CreateJobPreferenceRequest {
            title: "Engineer".to_string(),
            industry: None,
            location: None,
            work_mode: None,
            min_salary: Some(120_000),
            max_salary: Some(90_000),
            company_size: None,
            keywords: vec![],
        };
        assert!(req.validate().is_err());

        req.max_salary = Some(150_000);
        assert!(req.validate().is_ok());

        req.min_salary = Some(-1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        // No-op updates are not special-cased; an empty patch is accepted
        // and produces a new identical version.
        let patch = UpdateJobPreferenceRequest::default();
        assert!(patch.validate().is_ok());
    }
}
