//! Authentication middleware layer for protecting routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;
use crate::AppState;

use super::jwt;
use super::types::AuthUser;

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            success: false,
            error: message.to_string(),
            details: None,
        }),
    )
        .into_response()
}

/// Middleware function that requires authentication.
///
/// This can be used with `axum::middleware::from_fn_with_state` to protect
/// routes. The validated user is inserted as a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let config = &state.auth;

    // Try to get token from cookie first, then Authorization header
    let token = extract_token_from_cookie(request.headers(), &config.cookie_name)
        .or_else(|| extract_token_from_header(request.headers()));

    let token = match token {
        Some(t) => t,
        None => return unauthorized("Missing authentication"),
    };

    let claims = match jwt::validate_token(config, &token) {
        Ok(c) => c,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    let user_id = match claims.sub.parse::<i32>() {
        Ok(id) => id,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    request.extensions_mut().insert(AuthUser {
        user_id,
        full_name: claims.name.clone(),
    });

    let response = next.run(request).await;

    // Sliding expiry: re-issue the cookie once the token is a day old
    if jwt::should_refresh(&claims) {
        if let Ok(new_token) = jwt::create_token(config, user_id, &claims.name) {
            let cookie =
                build_auth_cookie(&config.cookie_name, &new_token, config.token_duration_days);
            let (mut parts, body) = response.into_parts();
            if let Ok(cookie_value) = cookie.parse() {
                parts.headers.insert(header::SET_COOKIE, cookie_value);
            }
            return Response::from_parts(parts, body);
        }
    }

    response
}

fn extract_token_from_cookie(headers: &axum::http::HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie_str in cookie_header.split(';') {
        if let Ok(cookie) = cookie::Cookie::parse(cookie_str.trim()) {
            if cookie.name() == cookie_name {
                return Some(cookie.value().to_string());
            }
        }
    }

    None
}

fn extract_token_from_header(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Build an auth cookie string.
pub fn build_auth_cookie(name: &str, value: &str, days: i64) -> String {
    let max_age = days * 24 * 60 * 60;
    let secure = if std::env::var("RUST_ENV").unwrap_or_default() == "production" {
        "; Secure"
    } else {
        ""
    };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        name, value, max_age, secure
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    #[test]
    fn cookie_token_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; auth_token=abc123; lang=en".parse().unwrap(),
        );
        assert_eq!(
            extract_token_from_cookie(&headers, "auth_token"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn bearer_header_is_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer xyz".parse().unwrap());
        assert_eq!(extract_token_from_header(&headers), Some("xyz".to_string()));
    }

    #[test]
    fn non_bearer_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(extract_token_from_header(&headers), None);
    }
}
