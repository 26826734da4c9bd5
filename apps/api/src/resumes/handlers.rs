//! Axum route handlers for the Resumes API.

use std::path::PathBuf;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::storage::{
    is_allowed_content_type, remove_upload, sanitize_filename, save_upload, stored_file_name,
};
use crate::resumes::store::{delete_resume, fetch_owned_resume, insert_resume, list_resumes};
use crate::routes::UserIdQuery;
use crate::state::AppState;

struct UploadedFile {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// Body-limit overruns keep their 413; every other multipart failure is a
/// malformed request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Resume file exceeds the upload size limit".to_string())
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// POST /api/v1/resumes
///
/// Multipart form with a `user_id` text field and a `file` part.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("user_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Invalid user_id field", e))?;
                let parsed = raw
                    .trim()
                    .parse::<Uuid>()
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(parsed);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Invalid file", e))?;
                upload = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let user_id =
        user_id.ok_or_else(|| AppError::Validation("user_id field is required".to_string()))?;
    let upload =
        upload.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    if !is_allowed_content_type(&upload.content_type) {
        return Err(AppError::UnsupportedMediaType(format!(
            "Unsupported file type: {}",
            upload.content_type
        )));
    }

    let original = sanitize_filename(&upload.filename);
    let stored_name = stored_file_name(user_id, chrono::Utc::now().timestamp(), &original);
    let path = save_upload(&state.config.upload_dir, &stored_name, &upload.data).await?;

    let file_path = path.to_string_lossy();
    let resume = match insert_resume(&state.db, user_id, &original, &file_path).await {
        Ok(row) => row,
        Err(e) => {
            // Don't leave an orphaned file behind when the row can't be written.
            remove_upload(&path).await;
            return Err(e.into());
        }
    };

    info!(
        user_id = %user_id,
        resume_id = %resume.id,
        bytes = upload.data.len(),
        "Stored resume {}",
        stored_name
    );

    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    Ok(Json(list_resumes(&state.db, params.user_id).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(
        fetch_owned_resume(&state.db, resume_id, params.user_id).await?,
    ))
}

/// GET /api/v1/resumes/:id/download
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resume = fetch_owned_resume(&state.db, resume_id, params.user_id).await?;

    let path = PathBuf::from(&resume.file_path);
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(AppError::Gone("File on disk is missing".to_string()));
    }
    let data = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        resume.filename.replace(['"', '\r', '\n'], "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    ))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let resume = fetch_owned_resume(&state.db, resume_id, params.user_id).await?;

    remove_upload(std::path::Path::new(&resume.file_path)).await;
    delete_resume(&state.db, resume.id).await?;

    info!(user_id = %params.user_id, resume_id = %resume_id, "Deleted resume");
    Ok(StatusCode::NO_CONTENT)
}
