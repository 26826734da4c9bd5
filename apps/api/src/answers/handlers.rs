//! Axum route handlers for the Answers API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::answers::drafter::{draft_answers, AnswerDraft};
use crate::answers::prompts::FALLBACK_JOB_TITLE;
use crate::errors::AppError;
use crate::jobs::store::fetch_owned_job;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DraftAnswersRequest {
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub prompts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftAnswersResponse {
    pub job_id: Uuid,
    pub answers: Vec<AnswerDraft>,
}

/// POST /api/v1/answers/draft
///
/// STAR outlines for each non-blank prompt, tailored to the job's title.
pub async fn handle_draft_answers(
    State(state): State<AppState>,
    Json(request): Json<DraftAnswersRequest>,
) -> Result<Json<DraftAnswersResponse>, AppError> {
    if request.prompts.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "prompts cannot be empty".to_string(),
        ));
    }

    let job = fetch_owned_job(&state.db, request.job_id, request.user_id).await?;
    let job_title = job.title.as_deref().unwrap_or(FALLBACK_JOB_TITLE);

    let answers = draft_answers(&request.prompts, job_title);
    if answers.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No valid prompts provided".to_string(),
        ));
    }

    info!(
        user_id = %request.user_id,
        job_id = %request.job_id,
        "Drafted {} answer(s)",
        answers.len()
    );

    Ok(Json(DraftAnswersResponse {
        job_id: request.job_id,
        answers,
    }))
}
