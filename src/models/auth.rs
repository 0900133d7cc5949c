use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in the signed identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String, // user UUID
    pub iat: usize,
    pub exp: usize,
}

/// Extracted from a validated identity token — available via Axum extractors.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}
