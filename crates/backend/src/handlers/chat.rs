//! Assistant handlers: chat intent detection and the health AI endpoints.
//!
//! Every endpoint degrades to a fixed fallback string when the model is
//! unconfigured or misbehaves; assistant failures never surface as errors.

use axum::{extract::State, Extension, Json};
use chrono::{Duration, Utc};
use serde_json::Value;
use shared_types::{
    AssistantAnswerResponse, CalorieEstimateRequest, ChatIntentRequest, MealPlanRequest,
    SymptomCheckRequest, User,
};
use validator::Validate;

use crate::auth::types::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewChain, NewTask};
use crate::services::schedule::{self, RangeBound};
use crate::services::{assistant, prompts};
use crate::AppState;

fn answer(text: String) -> Json<AssistantAnswerResponse> {
    Json(AssistantAnswerResponse {
        success: true,
        answer: text,
    })
}

async fn load_user(state: &AppState, user_id: i32) -> ApiResult<User> {
    let mut conn = state.pool.get().await?;
    db::users::get_by_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))
}

/// POST /api/chat/intent. Runs intent detection over the message and acts
/// on the result: tasks and projects are created directly, clarification
/// questions and chat replies pass through.
pub async fn chat_intent(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChatIntentRequest>,
) -> ApiResult<Json<AssistantAnswerResponse>> {
    payload.validate()?;

    let prompt = prompts::chat_intent(&payload.message);
    let raw = state.assistant.generate(&prompt, 512).await;

    let Some(intent) = assistant::extract_json(&raw) else {
        // Not JSON at all; treat the completion as a plain chat reply.
        return Ok(answer(raw));
    };

    match intent.get("intent").and_then(Value::as_str) {
        Some("create_task") => {
            let Some(title) = intent.get("title").and_then(Value::as_str) else {
                return Ok(answer(assistant::COULD_NOT_PROCESS.to_string()));
            };
            let minutes = intent
                .get("estimated_duration_minutes")
                .and_then(Value::as_i64)
                .filter(|m| *m > 0)
                .unwrap_or(60);

            let start = Utc::now();
            let mut conn = state.pool.get().await?;
            db::tasks::create(
                &mut conn,
                NewTask {
                    user_id: user.user_id,
                    title,
                    note: None,
                    start_time: Some(start),
                    end_time: Some(start + Duration::minutes(minutes)),
                    priority: None,
                    is_done: false,
                    tag_id: None,
                },
            )
            .await?;

            tracing::info!(title, "created task from chat intent");
            Ok(answer(format!("Task \"{title}\" created.")))
        }
        Some("create_project") => {
            let Some(name) = intent.get("name").and_then(Value::as_str) else {
                return Ok(answer(assistant::COULD_NOT_PROCESS.to_string()));
            };
            let days = intent
                .get("estimated_duration_days")
                .and_then(Value::as_i64)
                .filter(|d| *d > 0)
                .unwrap_or(7);
            let description = intent
                .get("description")
                .and_then(Value::as_str)
                .filter(|d| !d.trim().is_empty());
            let priority = intent.get("priority").and_then(Value::as_str);

            let today = schedule::today();
            let start =
                schedule::normalize_timestamp(&today.to_string(), RangeBound::Start)?;
            let end = schedule::normalize_timestamp(
                &(today + Duration::days(days - 1)).to_string(),
                RangeBound::End,
            )?;

            let mut conn = state.pool.get().await?;
            db::chains::create(
                &mut conn,
                NewChain {
                    user_id: user.user_id,
                    title: name,
                    description,
                    color: None,
                    priority,
                    start_time: Some(start),
                    end_time: Some(end),
                    tag_id: None,
                },
            )
            .await?;

            tracing::info!(name, "created project from chat intent");
            Ok(answer(format!("Project \"{name}\" created.")))
        }
        Some("clarify_project_time") | Some("clarify_task_time") => {
            let question = intent
                .get("question")
                .and_then(Value::as_str)
                .unwrap_or("Could you tell me how long this should take?");
            Ok(answer(question.to_string()))
        }
        _ => {
            let reply = intent
                .get("reply")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(raw);
            Ok(answer(reply))
        }
    }
}

/// POST /api/health/ai/calories
pub async fn calorie_estimate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CalorieEstimateRequest>,
) -> ApiResult<Json<AssistantAnswerResponse>> {
    payload.validate()?;
    let account = load_user(&state, user.user_id).await?;

    let prompt = format!(
        "{}{}",
        prompts::profile_context(
            account.height_cm,
            account.weight_kg,
            account.medical_conditions.as_deref()
        ),
        prompts::calorie_estimate(&payload.text)
    );

    Ok(answer(state.assistant.generate(&prompt, 1024).await))
}

/// POST /api/health/ai/meal
pub async fn meal_plan(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<MealPlanRequest>,
) -> ApiResult<Json<AssistantAnswerResponse>> {
    payload.validate()?;
    let account = load_user(&state, user.user_id).await?;

    let prompt = format!(
        "{}{}",
        prompts::profile_context(
            account.height_cm,
            account.weight_kg,
            account.medical_conditions.as_deref()
        ),
        prompts::meal_plan(&payload.goal, payload.condition.as_deref())
    );

    Ok(answer(state.assistant.generate(&prompt, 1024).await))
}

/// POST /api/health/ai/symptom
pub async fn symptom_check(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SymptomCheckRequest>,
) -> ApiResult<Json<AssistantAnswerResponse>> {
    payload.validate()?;
    let account = load_user(&state, user.user_id).await?;

    let prompt = format!(
        "{}{}",
        prompts::profile_context(
            account.height_cm,
            account.weight_kg,
            account.medical_conditions.as_deref()
        ),
        prompts::symptom_check(&payload.text)
    );

    Ok(answer(state.assistant.generate(&prompt, 1024).await))
}

/// GET /api/health/ai/weekly-advice
pub async fn weekly_advice(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<AssistantAnswerResponse>> {
    let since = schedule::today() - Duration::days(6);

    let mut conn = state.pool.get().await?;
    let logs = db::health::logs_since(&mut conn, user.user_id, since).await?;
    drop(conn);

    if logs.is_empty() {
        return Ok(answer(
            "No health data logged in the last 7 days. Log a few days first to get advice."
                .to_string(),
        ));
    }

    let prompt = prompts::weekly_advice(&prompts::weekly_summary_lines(&logs));
    Ok(answer(state.assistant.generate(&prompt, 1024).await))
}
