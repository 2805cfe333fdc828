//! Tag handlers.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use shared_types::{AckResponse, TagRequest, TagResponse, TagsResponse};
use validator::Validate;

use crate::auth::types::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<TagsResponse>> {
    let mut conn = state.pool.get().await?;
    let tags = db::tags::list_all(&mut conn, user.user_id).await?;

    Ok(Json(TagsResponse {
        success: true,
        tags,
    }))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<TagRequest>,
) -> ApiResult<Json<TagResponse>> {
    payload.validate()?;

    let mut conn = state.pool.get().await?;
    let tag = db::tags::create(&mut conn, user.user_id, &payload.title, &payload.color).await?;

    Ok(Json(TagResponse { success: true, tag }))
}

/// GET /api/tags/:id
pub async fn get_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tag_id): Path<i32>,
) -> ApiResult<Json<TagResponse>> {
    let mut conn = state.pool.get().await?;

    let tag = db::tags::get_by_id(&mut conn, user.user_id, tag_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag"))?;

    Ok(Json(TagResponse { success: true, tag }))
}

/// PUT /api/tags/:id
pub async fn update_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tag_id): Path<i32>,
    Json(payload): Json<TagRequest>,
) -> ApiResult<Json<TagResponse>> {
    payload.validate()?;

    let mut conn = state.pool.get().await?;
    let tag = db::tags::update(&mut conn, user.user_id, tag_id, &payload.title, &payload.color)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag"))?;

    Ok(Json(TagResponse { success: true, tag }))
}

/// DELETE /api/tags/:id. Referencing items keep existing with their tag
/// reference nulled.
pub async fn delete_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tag_id): Path<i32>,
) -> ApiResult<Json<AckResponse>> {
    let mut conn = state.pool.get().await?;

    if !db::tags::delete(&mut conn, user.user_id, tag_id).await? {
        return Err(ApiError::not_found("Tag"));
    }
    Ok(Json(AckResponse::ok()))
}
