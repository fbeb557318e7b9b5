/*
 * Responsibility
 * - /users/{last_name}/{first_name} handlers (GET / POST / PUT)
 * - Path/Json extraction, DTO validation, repo call, `{"user": ...}` shaping
 * - POST/PUT only run after the credential gate (see routes.rs)
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    api::dto::users::{UserAgeRequest, UserEnvelope, UserPath},
    error::AppError,
    repos::error::RepoError,
    state::AppState,
};

pub const USER_NOT_FOUND: &str = "user not found";
pub const USER_ALREADY_EXISTS: &str = "user already in database";
pub const UNABLE_TO_CREATE: &str = "unable to create user";
pub const UNABLE_TO_UPDATE: &str = "unable to update user";

fn parse_age(payload: Result<Json<UserAgeRequest>, JsonRejection>) -> Result<i32, AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::bad_request)
}

/// Not-found keeps the 400 + message mapping rather than 404.
pub async fn get_user(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> Result<Json<UserEnvelope>, AppError> {
    path.validate().map_err(AppError::bad_request)?;

    let row = state
        .users
        .get(&path.last_name, &path.first_name)
        .await?
        .ok_or_else(|| AppError::bad_request(USER_NOT_FOUND))?;

    Ok(Json(row.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
    payload: Result<Json<UserAgeRequest>, JsonRejection>,
) -> Result<Json<UserEnvelope>, AppError> {
    path.validate().map_err(AppError::bad_request)?;
    let age = parse_age(payload)?;

    // Fast path only; the repository's create is what enforces uniqueness.
    let existing = state
        .users
        .get(&path.last_name, &path.first_name)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "user lookup before create failed");
            AppError::bad_request(UNABLE_TO_CREATE)
        })?;
    if existing.is_some() {
        return Err(AppError::bad_request(USER_ALREADY_EXISTS));
    }

    match state
        .users
        .create(&path.last_name, &path.first_name, age)
        .await
    {
        Ok(row) => Ok(Json(row.into())),
        Err(RepoError::Conflict) => Err(AppError::bad_request(USER_ALREADY_EXISTS)),
        Err(e) => {
            tracing::error!(error = ?e, "user create failed");
            Err(AppError::bad_request(UNABLE_TO_CREATE))
        }
    }
}

/// Upsert: an absent key is created, not rejected.
pub async fn update_user(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
    payload: Result<Json<UserAgeRequest>, JsonRejection>,
) -> Result<Json<UserEnvelope>, AppError> {
    path.validate().map_err(AppError::bad_request)?;
    let age = parse_age(payload)?;

    let row = state
        .users
        .update(&path.last_name, &path.first_name, age)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "user update failed");
            AppError::bad_request(UNABLE_TO_UPDATE)
        })?
        .ok_or_else(|| AppError::bad_request(UNABLE_TO_UPDATE))?;

    Ok(Json(row.into()))
}
