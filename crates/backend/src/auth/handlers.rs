//! Authentication HTTP handlers: register, login, logout, current user.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use shared_types::{AckResponse, AuthUserResponse, LoginRequest, RegisterRequest};
use validator::Validate;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::types::AuthUser;
use super::{build_auth_cookie, jwt};

fn with_auth_cookie(state: &AppState, user_id: i32, full_name: &str, body: Response) -> ApiResult<Response> {
    let token = jwt::create_token(&state.auth, user_id, full_name)
        .map_err(|e| ApiError::Internal(e.into()))?;
    let cookie = build_auth_cookie(
        &state.auth.cookie_name,
        &token,
        state.auth.token_duration_days,
    );

    let (mut parts, body) = body.into_parts();
    parts.headers.insert(
        header::SET_COOKIE,
        cookie.parse().map_err(|e: header::InvalidHeaderValue| {
            ApiError::Internal(e.into())
        })?,
    );
    Ok(Response::from_parts(parts, body))
}

/// Create an account and sign the new user in.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Response> {
    payload.validate()?;

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let mut conn = state.pool.get().await?;
    let user = db::users::create(&mut conn, &payload.full_name, &payload.email, &password_hash)
        .await
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => ApiError::bad_request("Email already registered"),
            other => ApiError::Database(other),
        })?;

    tracing::info!(user_id = user.user_id, "registered new user");

    let body = Json(AuthUserResponse {
        success: true,
        user_id: user.user_id,
        full_name: user.full_name.clone(),
        email: user.email,
    })
    .into_response();

    with_auth_cookie(&state, user.user_id, &user.full_name, body)
}

/// Verify credentials and set the auth cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Response> {
    payload.validate()?;

    let mut conn = state.pool.get().await?;
    let user = db::users::get_by_email(&mut conn, &payload.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let matches = bcrypt::verify(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(e.into()))?;
    if !matches {
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    }

    let body = Json(AuthUserResponse {
        success: true,
        user_id: user.user_id,
        full_name: user.full_name.clone(),
        email: user.email,
    })
    .into_response();

    with_auth_cookie(&state, user.user_id, &user.full_name, body)
}

/// Clear the auth cookie.
pub async fn logout(State(state): State<AppState>) -> ApiResult<Response> {
    let cookie = build_auth_cookie(&state.auth.cookie_name, "", 0);

    let (mut parts, body) = Json(AckResponse::ok()).into_response().into_parts();
    parts.headers.insert(
        header::SET_COOKIE,
        cookie.parse().map_err(|e: header::InvalidHeaderValue| {
            ApiError::Internal(e.into())
        })?,
    );
    Ok(Response::from_parts(parts, body))
}

/// Return the authenticated user's account details.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<AuthUserResponse>> {
    let mut conn = state.pool.get().await?;
    let user = db::users::get_by_id(&mut conn, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(AuthUserResponse {
        success: true,
        user_id: user.user_id,
        full_name: user.full_name,
        email: user.email,
    }))
}
