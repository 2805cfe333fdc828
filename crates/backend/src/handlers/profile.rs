//! Health profile handlers.

use axum::{extract::State, Extension, Json};
use shared_types::{ProfileResponse, UpdateProfileRequest};
use validator::Validate;

use crate::auth::types::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const HISTORY_LIMIT: i64 = 20;

async fn load_profile(
    conn: &mut diesel_async::AsyncPgConnection,
    user_id: i32,
) -> ApiResult<ProfileResponse> {
    let user = db::users::get_by_id(conn, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    let history = db::users::profile_history(conn, user_id, HISTORY_LIMIT).await?;

    Ok(ProfileResponse {
        success: true,
        full_name: user.full_name,
        email: user.email,
        height_cm: user.height_cm,
        weight_kg: user.weight_kg,
        medical_conditions: user.medical_conditions,
        history,
    })
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<ProfileResponse>> {
    let mut conn = state.pool.get().await?;
    Ok(Json(load_profile(&mut conn, user.user_id).await?))
}

/// POST /api/profile. Replaces the health-profile fields and appends a
/// history entry.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    payload.validate()?;

    let mut conn = state.pool.get().await?;
    let updated = db::users::update_health_profile(
        &mut conn,
        user.user_id,
        payload.height_cm,
        payload.weight_kg,
        payload.medical_conditions.as_deref(),
    )
    .await?;

    if !updated {
        return Err(ApiError::not_found("User"));
    }

    Ok(Json(load_profile(&mut conn, user.user_id).await?))
}
