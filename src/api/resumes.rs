//! Resume API endpoints.
//!
//! Upload order matters: the file is validated, then parsed, then stored,
//! and only after all three succeed is the database row created. A parse
//! failure never leaves a row or an orphaned active flag behind.

use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use futures_util::StreamExt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::db::active_flag::ActiveResource;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::resume::ACCEPTED_RESUME_MIME_TYPES;
use crate::models::{ResumeListResponse, ResumeResponse};
use crate::services::{ParserClient, Storage};

/// One validated file from the upload form.
struct UploadedFile {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

/// Configure resume routes.
/// Note: the literal `/resumes/active` path must be registered before the
/// parameterized ones.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_resume)
        .service(get_active_resume)
        .service(list_resumes)
        .service(activate_resume)
        .service(download_resume)
        .service(delete_resume);
}

/// Upload a resume.
///
/// POST /resumes (multipart, field "file")
///
/// The new resume becomes the user's active resume; any previously active
/// resume is deactivated in the same transaction.
#[utoipa::path(
    post,
    path = "/api/v1/resumes",
    tag = "Resumes",
    responses(
        (status = 201, description = "Resume uploaded and parsed", body = ResumeResponse),
        (status = 400, description = "Invalid file type or size", body = crate::error::ErrorResponse),
        (status = 502, description = "Parsing service unavailable", body = crate::error::ErrorResponse)
    )
)]
#[post("/resumes")]
pub async fn upload_resume(
    user: AuthenticatedUser,
    mut payload: Multipart,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    parser: web::Data<ParserClient>,
    max_resume_size: web::Data<usize>,
) -> AppResult<HttpResponse> {
    let file = read_resume_file(&mut payload, *max_resume_size.get_ref()).await?;

    // Parse before any store write; a failure here leaves no trace.
    let parsed_data = parser
        .parse(file.bytes.clone(), &file.mime_type, &file.filename)
        .await?;

    let resume_id = Uuid::new_v4();
    let storage_key = Storage::resume_key(
        &user.id.to_string(),
        &resume_id.to_string(),
        &file.filename,
    );

    storage
        .put(&storage_key, file.bytes.clone(), &file.mime_type)
        .await?;

    let inserted = pool
        .insert_resume_as_active(
            resume_id,
            user.id,
            &storage_key,
            &file.filename,
            &file.mime_type,
            file.bytes.len() as i64,
            parsed_data,
        )
        .await;

    let model = match inserted {
        Ok(model) => model,
        Err(e) => {
            // The blob was already written; remove it so the failed insert
            // leaves nothing behind. Best effort only.
            if let Err(cleanup_err) = storage.delete(&storage_key).await {
                warn!(
                    "Failed to clean up blob {} after insert failure: {}",
                    storage_key, cleanup_err
                );
            }
            return Err(e);
        }
    };

    info!(
        "Resume {} uploaded for user {} ({} bytes)",
        model.id, user.id, model.size_bytes
    );

    Ok(HttpResponse::Created().json(ResumeResponse::from(model)))
}

/// List the caller's resumes.
///
/// GET /resumes
#[utoipa::path(
    get,
    path = "/api/v1/resumes",
    tag = "Resumes",
    responses(
        (status = 200, description = "The caller's resumes, newest first", body = ResumeListResponse)
    )
)]
#[get("/resumes")]
pub async fn list_resumes(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let resumes = pool.list_resumes(user.id).await?;

    Ok(HttpResponse::Ok().json(ResumeListResponse {
        resumes: resumes.into_iter().map(ResumeResponse::from).collect(),
    }))
}

/// Get the caller's active resume.
///
/// GET /resumes/active
#[utoipa::path(
    get,
    path = "/api/v1/resumes/active",
    tag = "Resumes",
    responses(
        (status = 200, description = "The active resume", body = ResumeResponse),
        (status = 404, description = "No active resume", body = crate::error::ErrorResponse)
    )
)]
#[get("/resumes/active")]
pub async fn get_active_resume(
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let resume = pool
        .get_active_resume(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Active resume".to_string()))?;

    Ok(HttpResponse::Ok().json(ResumeResponse::from(resume)))
}

/// Make a resume the caller's active resume.
///
/// PUT /resumes/{id}/active
#[utoipa::path(
    put,
    path = "/api/v1/resumes/{id}/active",
    tag = "Resumes",
    params(
        ("id" = String, Path, description = "Resume UUID")
    ),
    responses(
        (status = 200, description = "Resume activated", body = ResumeResponse),
        (status = 404, description = "Resume not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Concurrent activation conflict", body = crate::error::ErrorResponse)
    )
)]
#[put("/resumes/{id}/active")]
pub async fn activate_resume(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    pool.activate(user.id, ActiveResource::Resume, id).await?;

    let resume = pool
        .get_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {}", id)))?;

    Ok(HttpResponse::Ok().json(ResumeResponse::from(resume)))
}

/// Download the original resume file.
///
/// GET /resumes/{id}/file
#[utoipa::path(
    get,
    path = "/api/v1/resumes/{id}/file",
    tag = "Resumes",
    params(
        ("id" = String, Path, description = "Resume UUID")
    ),
    responses(
        (status = 200, description = "Resume file content"),
        (status = 404, description = "Resume not found", body = crate::error::ErrorResponse)
    )
)]
#[get("/resumes/{id}/file")]
pub async fn download_resume(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    let resume = pool
        .get_resume(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {}", id)))?;

    let (data, content_type) = storage.get(&resume.storage_key).await?;

    Ok(HttpResponse::Ok()
        .content_type(content_type.unwrap_or_else(|| resume.mime_type.clone()))
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", resume.original_filename),
        ))
        .body(data))
}

/// Delete a resume.
///
/// DELETE /resumes/{id}
///
/// The database row is removed first; blob cleanup is best effort, and a
/// failed blob delete is logged rather than surfaced. Orphaned blobs are an
/// accepted failure mode.
#[utoipa::path(
    delete,
    path = "/api/v1/resumes/{id}",
    tag = "Resumes",
    params(
        ("id" = String, Path, description = "Resume UUID")
    ),
    responses(
        (status = 204, description = "Resume deleted"),
        (status = 404, description = "Resume not found", body = crate::error::ErrorResponse)
    )
)]
#[delete("/resumes/{id}")]
pub async fn delete_resume(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;

    let deleted = pool.delete_resume(user.id, id).await?;

    if let Err(e) = storage.delete(&deleted.storage_key).await {
        warn!(
            "Failed to delete blob {} for resume {}: {}",
            deleted.storage_key, deleted.id, e
        );
    }

    info!("Resume {} deleted for user {}", deleted.id, user.id);

    Ok(HttpResponse::NoContent().finish())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Read the uploaded file from the multipart payload, enforcing the size
/// limit and accepted MIME types before anything is parsed or stored.
async fn read_resume_file(payload: &mut Multipart, max_size: usize) -> AppResult<UploadedFile> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let Some(content_disposition) = field.content_disposition() else {
            continue;
        };

        let filename = match content_disposition.get_filename() {
            Some(name) => sanitize_filename(name)?,
            None => continue,
        };

        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_default();

        if !ACCEPTED_RESUME_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(AppError::InvalidInput(
                "Only PDF and DOCX files are supported".to_string(),
            ));
        }

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk_data =
                chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
            if bytes.len() + chunk_data.len() > max_size {
                return Err(AppError::InvalidInput(format!(
                    "File exceeds maximum size of {} bytes",
                    max_size
                )));
            }
            bytes.extend_from_slice(&chunk_data);
        }

        if bytes.is_empty() {
            return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
        }

        return Ok(UploadedFile {
            filename,
            mime_type,
            bytes,
        });
    }

    Err(AppError::InvalidInput(
        "Missing file field in upload".to_string(),
    ))
}

/// Reduce a client-supplied filename to a safe basename.
fn sanitize_filename(name: &str) -> AppResult<String> {
    let normalized = name.replace('\\', "/");
    let basename = normalized.rsplit('/').next().unwrap_or("");

    if basename.is_empty() || basename == "." || basename == ".." {
        return Err(AppError::InvalidInput("Invalid filename".to_string()));
    }

    Ok(basename.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_path_components() {
        assert_eq!(sanitize_filename("cv.pdf").unwrap(), "cv.pdf");
        assert_eq!(sanitize_filename("a/b/cv.pdf").unwrap(), "cv.pdf");
        assert_eq!(sanitize_filename("..\\..\\cv.pdf").unwrap(), "cv.pdf");
    }

    #[test]
    fn test_sanitize_filename_rejects_traversal_names() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("uploads/..").is_err());
    }
}
