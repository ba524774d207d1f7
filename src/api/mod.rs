//! API endpoint modules.

pub mod company_ratings;
pub mod health;
pub mod job_applications;
pub mod job_preferences;
pub mod openapi;
pub mod resumes;

pub use company_ratings::configure_routes as configure_rating_routes;
pub use health::configure_health_routes;
pub use job_applications::configure_routes as configure_application_routes;
pub use job_preferences::configure_routes as configure_preference_routes;
pub use openapi::ApiDoc;
pub use resumes::configure_routes as configure_resume_routes;
