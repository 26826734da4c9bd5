use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRow;

pub async fn insert_job(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    description: &str,
) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (id, user_id, title, description)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// The caller's jobs, newest first.
pub async fn list_jobs(pool: &PgPool, user_id: Uuid) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Loads a job only if it belongs to `user_id`.
pub async fn fetch_owned_job(pool: &PgPool, job_id: Uuid, user_id: Uuid) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

/// Returns `false` when nothing owned by `user_id` matched.
pub async fn delete_owned_job(pool: &PgPool, job_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
