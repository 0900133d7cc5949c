use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::auth::AuthenticatedUser;
use crate::models::post::{CreatePostRequest, ListPostsQuery, Post};
use crate::services::auth::assert_owner;
use crate::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let cleaned = state.post_validation.run(body.body)?;
    let post = db::posts::create(&state.db, &cleaned, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let descending = query.sort.as_deref() == Some("desc");
    let posts = db::posts::list(&state.db, query.author_id, descending).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let post = db::posts::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("could not find post"))?;
    Ok(Json(post))
}

/// The resource is fetched before the ownership gate runs, so a missing
/// post is 404 for everyone while someone else's post is 403.
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let post = db::posts::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("could not find post"))?;
    assert_owner(user.user_id, post.user_id)?;
    db::posts::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
