use std::sync::atomic::Ordering;

use axum::{extract::State, middleware::Next, response::Response};

use crate::AppState;

/// Counts hits on the static fileserver. Observability only — nothing reads
/// this counter to make a decision.
pub async fn count_hit(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    state.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    next.run(request).await
}
