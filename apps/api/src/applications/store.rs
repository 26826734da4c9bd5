use sqlx::PgPool;
use uuid::Uuid;

use crate::applications::status::ApplicationStatus;
use crate::models::application::ApplicationRow;

pub async fn insert_application(
    pool: &PgPool,
    user_id: Uuid,
    job_id: Uuid,
    resume_id: Uuid,
    status: ApplicationStatus,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (id, user_id, job_id, resume_id, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(job_id)
    .bind(resume_id)
    .bind(status.as_str())
    .fetch_one(pool)
    .await
}

/// The caller's applications, newest first.
pub async fn list_applications(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// `None` when no application with that id belongs to `user_id`.
pub async fn update_application_status(
    pool: &PgPool,
    application_id: Uuid,
    user_id: Uuid,
    status: ApplicationStatus,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $1 WHERE id = $2 AND user_id = $3 RETURNING *",
    )
    .bind(status.as_str())
    .bind(application_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
