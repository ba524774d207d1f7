//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AutoJobber Server",
        version = "0.3.0",
        description = "API server for tracking job applications, resumes, job preferences, and company ratings"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Resume endpoints
        api::resumes::upload_resume,
        api::resumes::list_resumes,
        api::resumes::get_active_resume,
        api::resumes::activate_resume,
        api::resumes::download_resume,
        api::resumes::delete_resume,
        // Job preference endpoints
        api::job_preferences::create_preference,
        api::job_preferences::list_preferences,
        api::job_preferences::get_active_preference,
        api::job_preferences::update_preference,
        api::job_preferences::activate_preference,
        api::job_preferences::delete_preference,
        // Job application endpoints
        api::job_applications::create_application,
        api::job_applications::list_applications,
        api::job_applications::get_application,
        api::job_applications::update_application,
        api::job_applications::delete_application,
        // Company rating endpoints
        api::company_ratings::create_rating,
        api::company_ratings::list_my_ratings,
        api::company_ratings::get_company_stats,
        api::company_ratings::get_top_companies,
        api::company_ratings::delete_rating,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Resumes
            models::ResumeResponse,
            models::ResumeListResponse,
            // Job preferences
            models::WorkMode,
            models::CompanySize,
            models::CreateJobPreferenceRequest,
            models::UpdateJobPreferenceRequest,
            models::JobPreferenceResponse,
            models::JobPreferenceListResponse,
            // Job applications
            models::ApplicationStatus,
            models::CreateJobApplicationRequest,
            models::UpdateJobApplicationRequest,
            models::JobApplicationResponse,
            models::JobApplicationListResponse,
            models::ListApplicationsQuery,
            // Company ratings
            models::CreateCompanyRatingRequest,
            models::CompanyRatingResponse,
            models::CompanyRatingListResponse,
            models::CompanyStats,
            models::CompanyStatsResponse,
            models::TopCompany,
            models::TopCompaniesQuery,
            models::TopCompaniesResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Resumes", description = "Resume upload and activation"),
        (name = "Job Preferences", description = "Versioned job search preferences"),
        (name = "Job Applications", description = "Job application tracking"),
        (name = "Company Ratings", description = "Company ratings and statistics")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the gateway identity header as a security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "gateway_identity",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new("X-User-Id"),
                    ),
                ),
            );
        }
    }
}
