use sqlx::PgPool;
use uuid::Uuid;

use crate::models::post::Post;

pub async fn create(pool: &PgPool, body: &str, user_id: Uuid) -> sqlx::Result<Post> {
    sqlx::query_as::<_, Post>(
        "INSERT INTO posts (body, user_id)
         VALUES ($1, $2)
         RETURNING id, body, user_id, created_at, updated_at",
    )
    .bind(body)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, author_id: Option<Uuid>, descending: bool) -> sqlx::Result<Vec<Post>> {
    let order = if descending { "DESC" } else { "ASC" };
    match author_id {
        Some(author) => {
            sqlx::query_as::<_, Post>(&format!(
                "SELECT id, body, user_id, created_at, updated_at
                 FROM posts WHERE user_id = $1 ORDER BY created_at {order}"
            ))
            .bind(author)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Post>(&format!(
                "SELECT id, body, user_id, created_at, updated_at
                 FROM posts ORDER BY created_at {order}"
            ))
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn get(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<Post>> {
    sqlx::query_as::<_, Post>(
        "SELECT id, body, user_id, created_at, updated_at FROM posts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_all(pool: &PgPool) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM posts").execute(pool).await?;
    Ok(())
}
