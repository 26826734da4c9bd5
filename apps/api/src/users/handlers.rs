//! Axum route handlers for the Users API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

/// Minimal shape check: one `@` with something on both sides and a dot in
/// the domain.
fn validate_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(email.to_string())
    } else {
        Err(AppError::UnprocessableEntity(
            "email must be a valid address".to_string(),
        ))
    }
}

const DUPLICATE_EMAIL: &str = "Email already exists";

/// A concurrent registration can pass the existence check and still lose on
/// the unique index; report that the same way as a known duplicate.
fn registration_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Validation(DUPLICATE_EMAIL.to_string())
        }
        other => AppError::Database(other),
    }
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    let email = validate_email(&request.email)?;

    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_some() {
        return Err(AppError::Validation(DUPLICATE_EMAIL.to_string()));
    }

    let user = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (id, email) VALUES ($1, $2) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .fetch_one(&state.db)
    .await
    .map_err(registration_error)?;

    info!(user_id = %user.id, "Registered user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}
