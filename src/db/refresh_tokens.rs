use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::RefreshToken;

pub async fn insert(
    pool: &PgPool,
    token: &str,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> sqlx::Result<RefreshToken> {
    sqlx::query_as::<_, RefreshToken>(
        "INSERT INTO refresh_tokens (token, user_id, expires_at)
         VALUES ($1, $2, $3)
         RETURNING token, user_id, created_at, expires_at, revoked_at",
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &PgPool, token: &str) -> sqlx::Result<Option<RefreshToken>> {
    sqlx::query_as::<_, RefreshToken>(
        "SELECT token, user_id, created_at, expires_at, revoked_at
         FROM refresh_tokens WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Sets revoked_at for a not-yet-revoked token. Returns false when the token
/// is unknown or already revoked — a revocation is never undone.
pub async fn revoke(pool: &PgPool, token: &str) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE refresh_tokens SET revoked_at = NOW()
         WHERE token = $1 AND revoked_at IS NULL",
    )
    .bind(token)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_all(pool: &PgPool) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM refresh_tokens").execute(pool).await?;
    Ok(())
}
