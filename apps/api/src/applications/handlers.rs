//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::status::ApplicationStatus;
use crate::applications::store::{
    insert_application, list_applications, update_application_status,
};
use crate::errors::AppError;
use crate::jobs::store::fetch_owned_job;
use crate::models::application::ApplicationRow;
use crate::resumes::store::fetch_owned_resume;
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub user_id: Uuid,
    pub status: String,
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, AppError> {
    raw.parse().map_err(AppError::UnprocessableEntity)
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let status = match request.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => ApplicationStatus::default(),
    };

    let job = fetch_owned_job(&state.db, request.job_id, request.user_id).await?;
    let resume = fetch_owned_resume(&state.db, request.resume_id, request.user_id).await?;

    let application =
        insert_application(&state.db, request.user_id, job.id, resume.id, status).await?;
    info!(
        user_id = %request.user_id,
        application_id = %application.id,
        job_id = %job.id,
        resume_id = %resume.id,
        "Created application ({status})"
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    Ok(Json(list_applications(&state.db, params.user_id).await?))
}

/// PUT /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let status = parse_status(&request.status)?;

    let application =
        update_application_status(&state.db, application_id, request.user_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    info!(
        user_id = %request.user_id,
        application_id = %application_id,
        "Application moved to {status}"
    );
    Ok(Json(application))
}
