// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::student::AuthRequest,
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
};

#[derive(sqlx::FromRow)]
struct Credentials {
    id: i64,
    username: String,
    password: String,
}

/// Creates a student account with zeroed statistics.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created with the new student's id.
pub async fn signup(
    State(pool): State<SqlitePool>,
    Json(payload): Json<AuthRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;

    let result = sqlx::query("INSERT INTO students (username, password) VALUES (?, ?)")
        .bind(&payload.username)
        .bind(&hashed_password)
        .execute(&pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                AppError::Conflict(format!("Username '{}' already exists", payload.username))
            } else {
                tracing::error!("Failed to register student: {:?}", e);
                AppError::from(e)
            }
        })?;

    let user_id = result.last_insert_rowid();
    tracing::info!("Registered student {} ({})", payload.username, user_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user_id": user_id
        })),
    ))
}

/// Authenticates a student and returns a bearer token.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<AuthRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student = sqlx::query_as::<_, Credentials>(
        "SELECT id, username, password FROM students WHERE username = ?",
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?
    .ok_or(AppError::AuthError("User not found".to_string()))?;

    if !verify_password(&payload.password, &student.password)? {
        return Err(AppError::AuthError("Incorrect password".to_string()));
    }

    let token = sign_jwt(
        student.id,
        &student.username,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "message": "Login successful",
        "user_id": student.id,
        "access_token": token,
        "token_type": "bearer"
    })))
}
