//! Company rating DTOs and aggregation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::company_rating;
use crate::error::{AppError, AppResult};

/// Request body for rating a company.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCompanyRatingRequest {
    /// Optional link to one of the caller's job applications.
    #[serde(default)]
    pub job_application_id: Option<Uuid>,
    pub company_name: String,
    /// Overall rating, 1-5.
    pub overall_rating: i16,
    #[serde(default)]
    pub interview_process_rating: Option<i16>,
    #[serde(default)]
    pub work_life_balance_rating: Option<i16>,
    #[serde(default)]
    pub compensation_rating: Option<i16>,
    #[serde(default)]
    pub career_growth_rating: Option<i16>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub pros: Option<String>,
    #[serde(default)]
    pub cons: Option<String>,
    /// Hide the author in public listings.
    #[serde(default)]
    pub anonymous: bool,
}

impl CreateCompanyRatingRequest {
    /// Validate the request before any store write.
    pub fn validate(&self) -> AppResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Missing required field: company_name".to_string(),
            ));
        }
        validate_rating("overall_rating", Some(self.overall_rating))?;
        validate_rating("interview_process_rating", self.interview_process_rating)?;
        validate_rating("work_life_balance_rating", self.work_life_balance_rating)?;
        validate_rating("compensation_rating", self.compensation_rating)?;
        validate_rating("career_growth_rating", self.career_growth_rating)?;
        Ok(())
    }
}

fn validate_rating(field: &str, value: Option<i16>) -> AppResult<()> {
    if let Some(v) = value
        && !(1..=5).contains(&v)
    {
        return Err(AppError::InvalidInput(format!(
            "{} must be between 1 and 5",
            field
        )));
    }
    Ok(())
}

/// Company rating response body.
///
/// `user_id` is null for anonymous ratings in every public view; only the
/// owner's own listing carries it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyRatingResponse {
    pub id: Uuid,
    /// Rating author; null when the rating is anonymous.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_application_id: Option<Uuid>,
    pub company_name: String,
    pub overall_rating: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_process_rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_life_balance_rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation_rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_growth_rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pros: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cons: Option<String>,
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl CompanyRatingResponse {
    /// Public view: the author of an anonymous rating is redacted for every
    /// caller, including the author.
    pub fn public_view(m: company_rating::Model) -> Self {
        let user_id = if m.anonymous { None } else { Some(m.user_id) };
        Self::build(m, user_id)
    }

    /// Owner view: ownership is exposed back to the author only.
    pub fn owner_view(m: company_rating::Model) -> Self {
        let user_id = Some(m.user_id);
        Self::build(m, user_id)
    }

    fn build(m: company_rating::Model, user_id: Option<Uuid>) -> Self {
        CompanyRatingResponse {
            id: m.id,
            user_id,
            job_application_id: m.job_application_id,
            company_name: m.company_name,
            overall_rating: m.overall_rating,
            interview_process_rating: m.interview_process_rating,
            work_life_balance_rating: m.work_life_balance_rating,
            compensation_rating: m.compensation_rating,
            career_growth_rating: m.career_growth_rating,
            review: m.review,
            pros: m.pros,
            cons: m.cons,
            anonymous: m.anonymous,
            created_at: m.created_at,
        }
    }
}

/// Aggregated statistics for one company.
///
/// Company names group by exact, case-sensitive equality. Means are absent
/// when no rating carries the dimension; count 0 yields all-absent means.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CompanyStats {
    pub company_name: String,
    /// Number of ratings for this company.
    pub ratings_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_overall: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_interview_process: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_work_life_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_compensation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_career_growth: Option<f64>,
}

/// Company statistics response: aggregate plus the public ratings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyStatsResponse {
    pub stats: CompanyStats,
    /// Individual ratings in the public view, newest first.
    pub ratings: Vec<CompanyRatingResponse>,
}

/// The caller's own ratings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyRatingListResponse {
    pub ratings: Vec<CompanyRatingResponse>,
}

/// One entry in the top-rated companies listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopCompany {
    pub company_name: String,
    /// Mean overall rating.
    pub avg_overall: f64,
    /// Number of ratings backing the mean.
    pub ratings_count: i64,
}

/// Query parameters for the top-rated companies listing.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TopCompaniesQuery {
    /// Maximum companies to return (clamped to [1, 100]).
    #[serde(default = "default_top_limit")]
    pub limit: i32,
}

fn default_top_limit() -> i32 {
    10
}

/// Top-rated companies response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopCompaniesResponse {
    /// Companies sorted by mean overall rating descending, name ascending.
    pub companies: Vec<TopCompany>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CreateCompanyRatingRequest {
        CreateCompanyRatingRequest {
            job_application_id: None,
            company_name: "Acme".to_string(),
            overall_rating: 4,
            interview_process_rating: Some(3),
            work_life_balance_rating: None,
            compensation_rating: None,
            career_growth_rating: None,
            review: None,
            pros: None,
            cons: None,
            anonymous: false,
        }
    }

    fn sample_model(anonymous: bool) -> company_rating::Model {
        company_rating::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_application_id: None,
            company_name: "Acme".to_string(),
            overall_rating: 4,
            interview_process_rating: None,
            work_life_balance_rating: None,
            compensation_rating: None,
            career_growth_rating: None,
            review: Some("solid".to_string()),
            pros: None,
            cons: None,
            anonymous,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rating_bounds_validation() {
        let mut req = sample_request();
        assert!(req.validate().is_ok());

        req.overall_rating = 0;
        assert!(req.validate().is_err());

        req.overall_rating = 6;
        assert!(req.validate().is_err());

        req.overall_rating = 5;
        req.compensation_rating = Some(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_company_name_required() {
        let mut req = sample_request();
        req.company_name = "   ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_anonymous_rating_redacted_in_public_view() {
        let model = sample_model(true);
        let public = CompanyRatingResponse::public_view(model.clone());
        assert_eq!(public.user_id, None);
        assert!(public.anonymous);

        // The owner's own listing still exposes ownership
        let owner = CompanyRatingResponse::owner_view(model);
        assert!(owner.user_id.is_some());
    }

    #[test]
    fn test_named_rating_keeps_author_in_public_view() {
        let model = sample_model(false);
        let expected = Some(model.user_id);
        let public = CompanyRatingResponse::public_view(model);
        assert_eq!(public.user_id, expected);
    }
}
