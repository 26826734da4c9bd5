use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;

pub async fn insert_resume(
    pool: &PgPool,
    user_id: Uuid,
    filename: &str,
    file_path: &str,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, filename, file_path)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(filename)
    .bind(file_path)
    .fetch_one(pool)
    .await
}

/// The caller's resumes, newest first.
pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY uploaded_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Loads a resume only if it belongs to `user_id`.
pub async fn fetch_owned_resume(
    pool: &PgPool,
    resume_id: Uuid,
    user_id: Uuid,
) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

pub async fn delete_resume(pool: &PgPool, resume_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(resume_id)
        .execute(pool)
        .await?;
    Ok(())
}
