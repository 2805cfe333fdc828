use axum::{
    http::{header, Method, StatusCode},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

mod auth;
mod db;
pub mod error;
mod handlers;
mod models;
mod schema;
mod services;

use auth::types::AuthConfig;
use db::DbPool;
use error::ApiError;
use services::assistant::Assistant;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth: AuthConfig,
    pub assistant: Assistant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    dotenvy::dotenv().ok();

    let pool = db::establish_connection_pool()?;
    let auth_config = AuthConfig::from_env().map_err(ApiError::Config)?;
    let assistant = Assistant::from_env();

    let state = AppState {
        pool,
        auth: auth_config,
        assistant,
    };

    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        // Project chain routes
        .route("/api/projects", get(handlers::chains::list_chains))
        .route("/api/projects", post(handlers::chains::create_chain))
        .route("/api/projects/:id", get(handlers::chains::get_chain))
        .route("/api/projects/:id", delete(handlers::chains::delete_chain))
        // Node routes
        .route(
            "/api/projects/:id/nodes",
            post(handlers::chains::create_node),
        )
        .route("/api/nodes/:id", post(handlers::chains::update_node))
        .route("/api/nodes/:id/toggle", post(handlers::chains::toggle_node))
        .route("/api/nodes/:id", delete(handlers::chains::delete_node))
        // Task routes
        .route("/api/tasks", get(handlers::tasks::list_tasks))
        .route("/api/tasks", post(handlers::tasks::create_task))
        .route("/api/tasks/:id", get(handlers::tasks::get_task))
        .route("/api/tasks/:id", post(handlers::tasks::update_task))
        .route("/api/tasks/:id/toggle", post(handlers::tasks::toggle_task))
        .route("/api/tasks/:id", delete(handlers::tasks::delete_task))
        // Tag routes
        .route("/api/tags", get(handlers::tags::list_tags))
        .route("/api/tags", post(handlers::tags::create_tag))
        .route("/api/tags/:id", get(handlers::tags::get_tag))
        .route("/api/tags/:id", put(handlers::tags::update_tag))
        .route("/api/tags/:id", delete(handlers::tags::delete_tag))
        // Health routes
        .route("/api/health/logs", post(handlers::health::save_log))
        .route("/api/health/summary", get(handlers::health::summary))
        .route("/api/health/today", get(handlers::health::today_status))
        .route("/api/health/goals", post(handlers::health::save_goal))
        .route("/api/health/goals", get(handlers::health::list_goals))
        .route(
            "/api/health/appointments",
            get(handlers::health::list_appointments),
        )
        .route(
            "/api/health/appointments",
            post(handlers::health::create_appointment),
        )
        .route(
            "/api/health/appointments/:id",
            get(handlers::health::get_appointment),
        )
        .route(
            "/api/health/appointments/:id",
            post(handlers::health::update_appointment),
        )
        .route(
            "/api/health/appointments/:id",
            delete(handlers::health::delete_appointment),
        )
        // Profile routes
        .route("/api/profile", get(handlers::profile::get_profile))
        .route("/api/profile", post(handlers::profile::update_profile))
        // Assistant routes
        .route("/api/chat/intent", post(handlers::chat::chat_intent))
        .route(
            "/api/health/ai/calories",
            post(handlers::chat::calorie_estimate),
        )
        .route("/api/health/ai/meal", post(handlers::chat::meal_plan))
        .route("/api/health/ai/symptom", post(handlers::chat::symptom_check))
        .route(
            "/api/health/ai/weekly-advice",
            get(handlers::chat::weekly_advice),
        )
        .layer(from_fn_with_state(state.clone(), auth::require_auth));

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .merge(protected)
        .layer(build_cors_layer())
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Build CORS layer based on environment configuration.
///
/// If CORS_ALLOWED_ORIGINS is set, only those origins are allowed.
/// If not set, defaults to permissive CORS (for development only).
fn build_cors_layer() -> CorsLayer {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();

    match allowed_origins {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                tracing::warn!(
                    "CORS_ALLOWED_ORIGINS is set but empty, using permissive CORS (not recommended for production)"
                );
                CorsLayer::permissive()
            } else {
                tracing::info!("CORS configured for origins: {:?}", origins);
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::DELETE,
                        Method::OPTIONS,
                    ])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                    .allow_credentials(true)
            }
        }
        None => {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS not set, using permissive CORS (not recommended for production)"
            );
            CorsLayer::permissive()
        }
    }
}
