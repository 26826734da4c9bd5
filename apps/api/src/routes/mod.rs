pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::answers::handlers as answers;
use crate::applications::handlers as applications;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as analysis;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::users::handlers as users;

/// Largest accepted resume upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Owner of the resources a GET/DELETE request touches.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/users", post(users::handle_create_user))
        .route("/api/v1/users/:id", get(users::handle_get_user))
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload_resume)
                .get(resumes::handle_list_resumes)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(resumes::handle_download_resume),
        )
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/analyze", post(jobs::handle_analyze_job))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        .route("/api/v1/analysis/score", post(analysis::handle_score))
        .route("/api/v1/answers/draft", post(answers::handle_draft_answers))
        .route(
            "/api/v1/applications",
            post(applications::handle_create_application)
                .get(applications::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id",
            put(applications::handle_update_application),
        )
        .with_state(state)
}
