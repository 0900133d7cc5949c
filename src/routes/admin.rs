use std::sync::atomic::Ordering;

use axum::{extract::State, http::StatusCode, response::Html};

use crate::db;
use crate::error::ApiError;
use crate::AppState;

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn show_metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.fileserver_hits.load(Ordering::Relaxed);
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Wren Admin</h1>\n    <p>Wren has been visited {hits} times!</p>\n  </body>\n</html>"
    ))
}

/// Wipes all durable state and zeroes the hit counter. Only available when
/// PLATFORM=dev; everywhere else this is a hard 403.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if !state.config.is_dev() {
        return Err(ApiError::Forbidden);
    }

    db::refresh_tokens::delete_all(&state.db).await?;
    db::posts::delete_all(&state.db).await?;
    db::users::delete_all(&state.db).await?;
    state.fileserver_hits.store(0, Ordering::Relaxed);

    tracing::warn!("dev reset: all users, posts and refresh tokens deleted");
    Ok(StatusCode::OK)
}
