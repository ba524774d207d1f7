//! Company rating API endpoints.
//!
//! Statistics are computed at read time over the stored ratings. Anonymous
//! ratings are redacted in every public view, the author's own requests
//! included; only the "my ratings" listing exposes ownership.

use actix_web::{delete, get, post, web, HttpResponse};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::db::company_ratings::compute_stats;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    CompanyRatingListResponse, CompanyRatingResponse, CompanyStatsResponse,
    CreateCompanyRatingRequest, TopCompaniesQuery, TopCompaniesResponse,
};

/// Configure company rating routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_rating)
        .service(list_my_ratings)
        .service(get_top_companies)
        .service(get_company_stats)
        .service(delete_rating);
}

/// Rate a company.
///
/// POST /company-ratings
#[utoipa::path(
    post,
    path = "/api/v1/company-ratings",
    tag = "Company Ratings",
    request_body = CreateCompanyRatingRequest,
    responses(
        (status = 201, description = "Rating created", body = CompanyRatingResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Referenced application not found", body = crate::error::ErrorResponse)
    )
)]
#[post("/company-ratings")]
pub async fn create_rating(
    user: AuthenticatedUser,
    body: web::Json<CreateCompanyRatingRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    body.validate()?;

    let model = pool.insert_rating(user.id, &body).await?;

    info!(
        "Company rating {} created for '{}' by user {}",
        model.id, model.company_name, user.id
    );

    Ok(HttpResponse::Created().json(CompanyRatingResponse::owner_view(model)))
}

/// List the caller's own ratings.
///
/// GET /company-ratings/mine
///
/// Ownership is exposed back to the author, anonymous ratings included.
#[utoipa::path(
    get,
    path = "/api/v1/company-ratings/mine",
    tag = "Company Ratings",
    responses(
        (status = 200, description = "The caller's ratings, newest first", body = CompanyRatingListResponse)
    )
)]
#[get("/company-ratings/mine")]
pub async fn list_my_ratings(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let ratings = pool.list_my_ratings(user.id).await?;

    Ok(HttpResponse::Ok().json(CompanyRatingListResponse {
        ratings: ratings
            .into_iter()
            .map(CompanyRatingResponse::owner_view)
            .collect(),
    }))
}

/// Company statistics and public ratings.
///
/// GET /company-ratings/company/{name}
///
/// Company names match exactly (case-sensitive). A company with no ratings
/// yields count 0 with all means absent.
#[utoipa::path(
    get,
    path = "/api/v1/company-ratings/company/{name}",
    tag = "Company Ratings",
    params(
        ("name" = String, Path, description = "Company name (exact match)")
    ),
    responses(
        (status = 200, description = "Statistics and public ratings", body = CompanyStatsResponse)
    )
)]
#[get("/company-ratings/company/{name}")]
pub async fn get_company_stats(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let company_name = path.into_inner();

    let ratings = pool.list_ratings_for_company(&company_name).await?;
    let stats = compute_stats(&company_name, &ratings);

    Ok(HttpResponse::Ok().json(CompanyStatsResponse {
        stats,
        ratings: ratings
            .into_iter()
            .map(CompanyRatingResponse::public_view)
            .collect(),
    }))
}

/// Top-rated companies.
///
/// GET /company-ratings/top?limit=10
///
/// Companies with fewer ratings than the configured minimum are excluded
/// to avoid single-review skew. Ties break by company name ascending.
#[utoipa::path(
    get,
    path = "/api/v1/company-ratings/top",
    tag = "Company Ratings",
    params(
        ("limit" = Option<i32>, Query, description = "Maximum companies to return (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Top-rated companies", body = TopCompaniesResponse)
    )
)]
#[get("/company-ratings/top")]
pub async fn get_top_companies(
    _user: AuthenticatedUser,
    query: web::Query<TopCompaniesQuery>,
    pool: web::Data<DbPool>,
    min_ratings: web::Data<u64>,
) -> AppResult<HttpResponse> {
    let limit = query.limit.clamp(1, 100) as u64;

    let companies = pool
        .top_rated_companies(*min_ratings.get_ref(), limit)
        .await?;

    Ok(HttpResponse::Ok().json(TopCompaniesResponse { companies }))
}

/// Delete one of the caller's ratings.
///
/// DELETE /company-ratings/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/company-ratings/{id}",
    tag = "Company Ratings",
    params(
        ("id" = String, Path, description = "Rating UUID")
    ),
    responses(
        (status = 204, description = "Rating deleted"),
        (status = 404, description = "Rating not found", body = crate::error::ErrorResponse)
    )
)]
#[delete("/company-ratings/{id}")]
pub async fn delete_rating(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    pool.delete_rating(user.id, id).await?;

    Ok(HttpResponse::NoContent().finish())
}
