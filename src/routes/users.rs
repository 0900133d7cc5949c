use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::db;
use crate::error::ApiError;
use crate::models::auth::AuthenticatedUser;
use crate::models::user::{CredentialsRequest, UserResponse};
use crate::services::auth::AuthService;
use crate::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let hashed = AuthService::hash_password(&body.password)?;
    let user = db::users::create(&state.db, &body.email, &hashed).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(&user, Utc::now())),
    ))
}

pub async fn update_credentials(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated =
        AuthService::update_credentials(&state.db, user.user_id, &body.email, &body.password)
            .await?;
    Ok(Json(UserResponse::from_user(&updated, Utc::now())))
}
