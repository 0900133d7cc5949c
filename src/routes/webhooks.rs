use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use chrono::{Duration, Utc};

use crate::db;
use crate::error::ApiError;
use crate::middleware::auth::{extract_credential, AuthScheme};
use crate::models::webhook::{WebhookEvent, WebhookPayload};
use crate::AppState;

const PREMIUM_GRANT: Duration = Duration::days(30);

/// Billing provider callback. Authenticated with the static ApiKey scheme;
/// unrecognized event types are acknowledged without side effects.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> Result<StatusCode, ApiError> {
    let key = extract_credential(&headers, AuthScheme::ApiKey)?;
    // TODO: compare in constant time once the provider key moves out of env
    // config; a plain equality leaks timing here.
    if key != state.config.webhook_api_key {
        return Err(ApiError::Unauthorized);
    }

    match payload.event {
        WebhookEvent::UserUpgraded => {
            let until = Utc::now() + PREMIUM_GRANT;
            let found = db::users::set_premium_until(&state.db, payload.data.user_id, until).await?;
            if !found {
                return Err(ApiError::NotFound("could not find user"));
            }
            tracing::info!(user_id = %payload.data.user_id, "premium granted via webhook");
        }
        WebhookEvent::Unrecognized => {}
    }

    Ok(StatusCode::NO_CONTENT)
}
