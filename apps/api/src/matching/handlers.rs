//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::store::fetch_owned_job;
use crate::matching::extract::{extract_text, DocumentRef};
use crate::matching::score_texts;
use crate::matching::scoring::ScoreReport;
use crate::resumes::store::fetch_owned_resume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
}

/// POST /api/v1/analysis/score
///
/// Keyword-overlap compatibility between one of the caller's resumes and one
/// of the caller's jobs.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let resume = fetch_owned_resume(&state.db, request.resume_id, request.user_id).await?;
    let job = fetch_owned_job(&state.db, request.job_id, request.user_id).await?;

    // PDF/DOCX parsing is CPU-bound and the read is blocking.
    let doc = DocumentRef::new(&resume.file_path);
    let resume_text = tokio::task::spawn_blocking(move || extract_text(&doc))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    let job_text = job.description.unwrap_or_default();

    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume text could not be read".to_string(),
        ));
    }
    if job_text.trim().is_empty() {
        return Err(AppError::Validation("Job description is empty".to_string()));
    }

    let report = score_texts(
        &state.keywords,
        state.fit_scorer.as_ref(),
        &resume_text,
        &job_text,
    );

    info!(
        user_id = %request.user_id,
        resume_id = %request.resume_id,
        job_id = %request.job_id,
        score = report.score,
        backend = state.fit_scorer.backend(),
        "Scored resume against job"
    );

    Ok(Json(report))
}
