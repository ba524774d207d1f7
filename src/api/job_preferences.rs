//! Job preference API endpoints.
//!
//! Preferences are versioned: updates never mutate the stored row, they
//! deactivate it and insert a new version. The history listing exposes
//! every version; the active row is the current preference.

use actix_web::{delete, get, post, put, web, HttpResponse};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::db::active_flag::ActiveResource;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateJobPreferenceRequest, JobPreferenceListResponse, JobPreferenceResponse,
    UpdateJobPreferenceRequest,
};

/// Configure job preference routes.
/// Note: the literal `/job-preferences/active` path must be registered
/// before the parameterized ones.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_preference)
        .service(get_active_preference)
        .service(list_preferences)
        .service(activate_preference)
        .service(update_preference)
        .service(delete_preference);
}

/// Create a job preference.
///
/// POST /job-preferences
///
/// The new preference becomes the user's active preference.
#[utoipa::path(
    post,
    path = "/api/v1/job-preferences",
    tag = "Job Preferences",
    request_body = CreateJobPreferenceRequest,
    responses(
        (status = 201, description = "Preference created", body = JobPreferenceResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
#[post("/job-preferences")]
pub async fn create_preference(
    user: AuthenticatedUser,
    body: web::Json<CreateJobPreferenceRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    body.validate()?;

    let model = pool.insert_preference_as_active(user.id, &body).await?;

    info!("Job preference {} created for user {}", model.id, user.id);

    Ok(HttpResponse::Created().json(JobPreferenceResponse::from(model)))
}

/// List all of the caller's preference versions.
///
/// GET /job-preferences
#[utoipa::path(
    get,
    path = "/api/v1/job-preferences",
    tag = "Job Preferences",
    responses(
        (status = 200, description = "Preference history, newest first", body = JobPreferenceListResponse)
    )
)]
#[get("/job-preferences")]
pub async fn list_preferences(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let preferences = pool.list_preferences(user.id).await?;

    Ok(HttpResponse::Ok().json(JobPreferenceListResponse {
        preferences: preferences
            .into_iter()
            .map(JobPreferenceResponse::from)
            .collect(),
    }))
}

/// Get the caller's active preference.
///
/// GET /job-preferences/active
#[utoipa::path(
    get,
    path = "/api/v1/job-preferences/active",
    tag = "Job Preferences",
    responses(
        (status = 200, description = "The active preference", body = JobPreferenceResponse),
        (status = 404, description = "No active preference", body = crate::error::ErrorResponse)
    )
)]
#[get("/job-preferences/active")]
pub async fn get_active_preference(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let preference = pool
        .get_active_preference(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Active job preference".to_string()))?;

    Ok(HttpResponse::Ok().json(JobPreferenceResponse::from(preference)))
}

/// Update a preference, creating a new version.
///
/// PUT /job-preferences/{id}
///
/// The addressed version is deactivated and kept in history; a new active
/// version is created with the patch applied.
#[utoipa::path(
    put,
    path = "/api/v1/job-preferences/{id}",
    tag = "Job Preferences",
    params(
        ("id" = String, Path, description = "Preference version UUID")
    ),
    request_body = UpdateJobPreferenceRequest,
    responses(
        (status = 200, description = "New active version", body = JobPreferenceResponse),
        (status = 404, description = "Preference not found", body = crate::error::ErrorResponse)
    )
)]
#[put("/job-preferences/{id}")]
pub async fn update_preference(
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateJobPreferenceRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    body.validate()?;

    let model = pool.update_preference_versioned(user.id, id, &body).await?;

    info!(
        "Job preference {} superseded by {} for user {}",
        id, model.id, user.id
    );

    Ok(HttpResponse::Ok().json(JobPreferenceResponse::from(model)))
}

/// Make a preference version the active one.
///
/// PUT /job-preferences/{id}/active
#[utoipa::path(
    put,
    path = "/api/v1/job-preferences/{id}/active",
    tag = "Job Preferences",
    params(
        ("id" = String, Path, description = "Preference version UUID")
    ),
    responses(
        (status = 200, description = "Preference activated", body = JobPreferenceResponse),
        (status = 404, description = "Preference not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Concurrent activation conflict", body = crate::error::ErrorResponse)
    )
)]
#[put("/job-preferences/{id}/active")]
pub async fn activate_preference(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    pool.activate(user.id, ActiveResource::JobPreference, id)
        .await?;

    let preference = pool
        .get_preference(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job preference {}", id)))?;

    Ok(HttpResponse::Ok().json(JobPreferenceResponse::from(preference)))
}

/// Delete one preference version.
///
/// DELETE /job-preferences/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/job-preferences/{id}",
    tag = "Job Preferences",
    params(
        ("id" = String, Path, description = "Preference version UUID")
    ),
    responses(
        (status = 204, description = "Preference deleted"),
        (status = 404, description = "Preference not found", body = crate::error::ErrorResponse)
    )
)]
#[delete("/job-preferences/{id}")]
pub async fn delete_preference(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    pool.delete_preference(user.id, id).await?;

    Ok(HttpResponse::NoContent().finish())
}
