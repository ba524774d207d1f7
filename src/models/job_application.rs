//! Job application DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::job_application;
use crate::error::{AppError, AppResult};

/// Application lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
    Ghosted,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::Ghosted => "ghosted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "applied" => Some(Self::Applied),
            "interview" => Some(Self::Interview),
            "offer" => Some(Self::Offer),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            "ghosted" => Some(Self::Ghosted),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for logging a job application.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateJobApplicationRequest {
    pub job_title: String,
    pub company: String,
    /// Date the application was submitted.
    pub application_date: NaiveDate,
    /// Initial status (default: applied).
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    /// Match score from the matching service, in [0, 1].
    #[serde(default)]
    pub match_score: Option<f64>,
}

impl CreateJobApplicationRequest {
    /// Validate the request before any store write.
    pub fn validate(&self) -> AppResult<()> {
        if self.job_title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Missing required field: job_title".to_string(),
            ));
        }
        if self.company.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Missing required field: company".to_string(),
            ));
        }
        validate_match_score(self.match_score)
    }
}

/// Patch body for updating a job application in place.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateJobApplicationRequest {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub application_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub match_score: Option<f64>,
}

impl UpdateJobApplicationRequest {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref title) = self.job_title
            && title.trim().is_empty()
        {
            return Err(AppError::InvalidInput(
                "job_title must not be empty".to_string(),
            ));
        }
        if let Some(ref company) = self.company
            && company.trim().is_empty()
        {
            return Err(AppError::InvalidInput(
                "company must not be empty".to_string(),
            ));
        }
        validate_match_score(self.match_score)
    }
}

fn validate_match_score(score: Option<f64>) -> AppResult<()> {
    if let Some(s) = score
        && !(0.0..=1.0).contains(&s)
    {
        return Err(AppError::InvalidInput(
            "match_score must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

/// Job application response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobApplicationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub application_date: NaiveDate,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<job_application::Model> for JobApplicationResponse {
    fn from(m: job_application::Model) -> Self {
        JobApplicationResponse {
            id: m.id,
            user_id: m.user_id,
            job_title: m.job_title,
            company: m.company,
            application_date: m.application_date,
            // The CHECK constraint keeps stored statuses in range
            status: ApplicationStatus::parse(&m.status).unwrap_or(ApplicationStatus::Applied),
            follow_up_date: m.follow_up_date,
            notes: m.notes,
            feedback: m.feedback,
            match_score: m.match_score,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Query parameters for listing job applications.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListApplicationsQuery {
    /// Filter by status.
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    /// Filter by company (exact match).
    #[serde(default)]
    pub company: Option<String>,
    /// Maximum results to return.
    #[serde(default = "default_limit")]
    pub limit: i32,
    /// Offset for pagination.
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    20
}

/// Job application list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobApplicationListResponse {
    /// Applications matching the filter, newest first.
    pub applications: Vec<JobApplicationResponse>,
    /// Total number of applications matching the filter.
    pub total: u64,
    /// Limit used.
    pub limit: i32,
    /// Offset used.
    pub offset: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::Interview,
            ApplicationStatus::Offer,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
            ApplicationStatus::Ghosted,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("pending"), None);
    }

    #[test]
    fn test_create_request_validation() {
        let mut req = CreateJobApplicationRequest {
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            application_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            status: None,
            follow_up_date: None,
            notes: None,
            feedback: None,
            match_score: Some(0.85),
        };
        assert!(req.validate().is_ok());

        req.match_score = Some(1.5);
        assert!(req.validate().is_err());

        req.match_score = None;
        req.company = "".to_string();
        assert!(req.validate().is_err());
    }
}
