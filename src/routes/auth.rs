use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

use crate::error::ApiError;
use crate::middleware::auth::{extract_credential, AuthScheme};
use crate::models::user::{CredentialsRequest, LoginResponse, RefreshResponse};
use crate::services::auth::AuthService;
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response =
        AuthService::login(&state.db, &body.email, &body.password, &state.config.jwt_secret)
            .await?;
    Ok(Json(response))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, ApiError> {
    let refresh_token = extract_credential(&headers, AuthScheme::Bearer)?;
    let response = AuthService::refresh(&state.db, &refresh_token, &state.config.jwt_secret).await?;
    Ok(Json(response))
}

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = extract_credential(&headers, AuthScheme::Bearer)?;
    AuthService::revoke(&state.db, &refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
