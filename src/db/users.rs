use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;

pub async fn create(pool: &PgPool, email: &str, hashed_password: &str) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, hashed_password)
         VALUES ($1, $2)
         RETURNING id, email, hashed_password, premium_expires_at, created_at, updated_at",
    )
    .bind(email)
    .bind(hashed_password)
    .fetch_one(pool)
    .await
}

pub async fn get_by_email(pool: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, hashed_password, premium_expires_at, created_at, updated_at
         FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn update_credentials(
    pool: &PgPool,
    id: Uuid,
    email: &str,
    hashed_password: &str,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET email = $2, hashed_password = $3, updated_at = NOW()
         WHERE id = $1
         RETURNING id, email, hashed_password, premium_expires_at, created_at, updated_at",
    )
    .bind(id)
    .bind(email)
    .bind(hashed_password)
    .fetch_optional(pool)
    .await
}

/// Returns false when no such user exists.
pub async fn set_premium_until(
    pool: &PgPool,
    id: Uuid,
    until: DateTime<Utc>,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE users SET premium_expires_at = $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(until)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_all(pool: &PgPool) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM users").execute(pool).await?;
    Ok(())
}
