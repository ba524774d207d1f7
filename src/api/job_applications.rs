//! Job application API endpoints.

use actix_web::{delete, get, post, put, web, HttpResponse};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateJobApplicationRequest, JobApplicationListResponse, JobApplicationResponse,
    ListApplicationsQuery, UpdateJobApplicationRequest,
};

/// Configure job application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_application)
        .service(list_applications)
        .service(get_application)
        .service(update_application)
        .service(delete_application);
}

/// Log a job application.
///
/// POST /job-applications
#[utoipa::path(
    post,
    path = "/api/v1/job-applications",
    tag = "Job Applications",
    request_body = CreateJobApplicationRequest,
    responses(
        (status = 201, description = "Application logged", body = JobApplicationResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
#[post("/job-applications")]
pub async fn create_application(
    user: AuthenticatedUser,
    body: web::Json<CreateJobApplicationRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    body.validate()?;

    let model = pool.insert_application(user.id, &body).await?;

    info!(
        "Application {} logged for user {} at '{}'",
        model.id, user.id, model.company
    );

    Ok(HttpResponse::Created().json(JobApplicationResponse::from(model)))
}

/// List the caller's applications with optional filters.
///
/// GET /job-applications?status=applied&company=Acme&limit=20&offset=0
#[utoipa::path(
    get,
    path = "/api/v1/job-applications",
    tag = "Job Applications",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("company" = Option<String>, Query, description = "Filter by company (exact match)"),
        ("limit" = Option<i32>, Query, description = "Maximum results (default: 20, max: 100)"),
        ("offset" = Option<i32>, Query, description = "Offset for pagination")
    ),
    responses(
        (status = 200, description = "Applications matching the filter", body = JobApplicationListResponse)
    )
)]
#[get("/job-applications")]
pub async fn list_applications(
    user: AuthenticatedUser,
    query: web::Query<ListApplicationsQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let (applications, total) = pool.list_applications(user.id, &query).await?;

    Ok(HttpResponse::Ok().json(JobApplicationListResponse {
        applications: applications
            .into_iter()
            .map(JobApplicationResponse::from)
            .collect(),
        total,
        limit: query.limit.clamp(1, 100),
        offset: query.offset.max(0),
    }))
}

/// Get one application by ID.
///
/// GET /job-applications/{id}
#[utoipa::path(
    get,
    path = "/api/v1/job-applications/{id}",
    tag = "Job Applications",
    params(
        ("id" = String, Path, description = "Application UUID")
    ),
    responses(
        (status = 200, description = "Application details", body = JobApplicationResponse),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/job-applications/{id}")]
pub async fn get_application(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    let application = pool
        .get_application(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job application {}", id)))?;

    Ok(HttpResponse::Ok().json(JobApplicationResponse::from(application)))
}

/// Update an application in place.
///
/// PUT /job-applications/{id}
#[utoipa::path(
    put,
    path = "/api/v1/job-applications/{id}",
    tag = "Job Applications",
    params(
        ("id" = String, Path, description = "Application UUID")
    ),
    request_body = UpdateJobApplicationRequest,
    responses(
        (status = 200, description = "Updated application", body = JobApplicationResponse),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse)
    )
)]
#[put("/job-applications/{id}")]
pub async fn update_application(
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateJobApplicationRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    body.validate()?;

    let model = pool.update_application(user.id, id, &body).await?;

    Ok(HttpResponse::Ok().json(JobApplicationResponse::from(model)))
}

/// Delete an application.
///
/// DELETE /job-applications/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/job-applications/{id}",
    tag = "Job Applications",
    params(
        ("id" = String, Path, description = "Application UUID")
    ),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found", body = crate::error::ErrorResponse)
    )
)]
#[delete("/job-applications/{id}")]
pub async fn delete_application(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    pool.delete_application(user.id, id).await?;

    info!("Application {} deleted for user {}", id, user.id);

    Ok(HttpResponse::NoContent().finish())
}
