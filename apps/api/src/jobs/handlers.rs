//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::ingest::{prepare_job, AnalyzeJobRequest};
use crate::jobs::store::{delete_owned_job, fetch_owned_job, insert_job, list_jobs};
use crate::models::job::JobRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// POST /api/v1/jobs/analyze
///
/// Creates a job from raw `jd_text` or by fetching `url` (the URL wins when
/// both are present).
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let draft = prepare_job(&request, state.page_fetcher.as_ref()).await?;

    let job = insert_job(&state.db, request.user_id, &draft.title, &draft.description).await?;
    info!(
        user_id = %request.user_id,
        job_id = %job.id,
        from_url = request.url.is_some(),
        "Created job \"{}\"",
        draft.title
    );

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(list_jobs(&state.db, params.user_id).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(fetch_owned_job(&state.db, job_id, params.user_id).await?))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !delete_owned_job(&state.db, job_id, params.user_id).await? {
        return Err(AppError::NotFound("Job not found".to_string()));
    }
    info!(user_id = %params.user_id, job_id = %job_id, "Deleted job");
    Ok(StatusCode::NO_CONTENT)
}
