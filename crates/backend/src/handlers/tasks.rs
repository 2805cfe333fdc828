//! Task handlers: day-scoped listing plus CRUD.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared_types::{
    AckResponse, CreateTaskRequest, TaskDetailResponse, TasksResponse, ToggleRequest,
    UpdateTaskRequest,
};
use validator::Validate;

use crate::auth::types::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::NewTask;
use crate::services::schedule::{self, RangeBound, TaskSort};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub date: Option<String>,
    pub sort: Option<String>,
}

/// GET /api/tasks?date=&sort=
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<TasksResponse>> {
    let day = schedule::resolve_day(query.date.as_deref())?;
    let sort = TaskSort::parse(query.sort.as_deref());

    let mut conn = state.pool.get().await?;
    let tasks =
        db::tasks::list_for_day(&mut conn, user.user_id, schedule::day_window(day), sort).await?;

    Ok(Json(TasksResponse {
        success: true,
        tasks,
    }))
}

/// POST /api/tasks. Bare `HH:MM` times are anchored to today.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskDetailResponse>> {
    payload.validate()?;

    let start = anchor_opt(payload.start_time.as_deref())?;
    let end = anchor_opt(payload.end_time.as_deref())?;

    let mut conn = state.pool.get().await?;
    let created = db::tasks::create(
        &mut conn,
        NewTask {
            user_id: user.user_id,
            title: &payload.title,
            note: payload.note.as_deref(),
            start_time: start,
            end_time: end,
            priority: payload.priority.as_deref(),
            is_done: false,
            tag_id: payload.tag_id,
        },
    )
    .await?;

    let task = db::tasks::get_by_id(&mut conn, user.user_id, created.task_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task"))?;

    Ok(Json(TaskDetailResponse {
        success: true,
        task,
    }))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(task_id): Path<i32>,
) -> ApiResult<Json<TaskDetailResponse>> {
    let mut conn = state.pool.get().await?;

    let task = db::tasks::get_by_id(&mut conn, user.user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task"))?;

    Ok(Json(TaskDetailResponse {
        success: true,
        task,
    }))
}

/// POST /api/tasks/:id. Dates and times arrive as separate fields and are
/// combined in the application offset.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(task_id): Path<i32>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskDetailResponse>> {
    payload.validate()?;

    let start = resolve_edge(
        payload.start_date.as_deref(),
        payload.start_time.as_deref(),
        RangeBound::Start,
    )?;
    let end = resolve_edge(
        payload.end_date.as_deref(),
        payload.end_time.as_deref(),
        RangeBound::End,
    )?;

    let mut conn = state.pool.get().await?;
    let updated = db::tasks::update(
        &mut conn,
        user.user_id,
        task_id,
        &payload.title,
        payload.note.as_deref(),
        start,
        end,
        payload.priority.as_deref(),
        payload.tag_id,
    )
    .await?;

    if !updated {
        return Err(ApiError::not_found("Task"));
    }

    let task = db::tasks::get_by_id(&mut conn, user.user_id, task_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task"))?;

    Ok(Json(TaskDetailResponse {
        success: true,
        task,
    }))
}

/// POST /api/tasks/:id/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(task_id): Path<i32>,
    Json(payload): Json<ToggleRequest>,
) -> ApiResult<Json<AckResponse>> {
    let mut conn = state.pool.get().await?;

    if !db::tasks::set_done(&mut conn, user.user_id, task_id, payload.is_done).await? {
        return Err(ApiError::not_found("Task"));
    }
    Ok(Json(AckResponse::ok()))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(task_id): Path<i32>,
) -> ApiResult<Json<AckResponse>> {
    let mut conn = state.pool.get().await?;

    if !db::tasks::delete(&mut conn, user.user_id, task_id).await? {
        return Err(ApiError::not_found("Task"));
    }
    Ok(Json(AckResponse::ok()))
}

fn anchor_opt(raw: Option<&str>) -> ApiResult<Option<DateTime<Utc>>> {
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(schedule::anchor_time_today)
        .transpose()?)
}

/// Resolve one edge of a task's time range from its optional date and time
/// parts. A date without a time falls back to the bound's default
/// time-of-day; a time without a date anchors to today.
fn resolve_edge(
    date: Option<&str>,
    time: Option<&str>,
    bound: RangeBound,
) -> ApiResult<Option<DateTime<Utc>>> {
    let date = date.filter(|s| !s.trim().is_empty());
    let time = time.filter(|s| !s.trim().is_empty());

    let resolved = match (date, time) {
        (Some(d), Some(t)) => Some(schedule::combine_date_time(d, t)?),
        (Some(d), None) => Some(schedule::normalize_timestamp(d, bound)?),
        (None, Some(t)) => Some(schedule::anchor_time_today(t)?),
        (None, None) => None,
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::schedule::APP_OFFSET;

    #[test]
    fn edge_resolution_combines_date_and_time() {
        let ts = resolve_edge(Some("2024-06-01"), Some("08:30"), RangeBound::Start)
            .unwrap()
            .unwrap();
        let local = ts.with_timezone(&APP_OFFSET);
        assert_eq!(local.to_rfc3339(), "2024-06-01T08:30:00+07:00");
    }

    #[test]
    fn date_only_uses_default_bound_time() {
        let ts = resolve_edge(Some("2024-06-01"), None, RangeBound::End)
            .unwrap()
            .unwrap();
        let local = ts.with_timezone(&APP_OFFSET);
        assert_eq!(local.to_rfc3339(), "2024-06-01T17:00:00+07:00");
    }

    #[test]
    fn empty_parts_clear_the_edge() {
        assert_eq!(resolve_edge(None, None, RangeBound::Start).unwrap(), None);
        assert_eq!(
            resolve_edge(Some(""), Some("  "), RangeBound::Start).unwrap(),
            None
        );
    }

    #[test]
    fn malformed_parts_are_rejected() {
        assert!(resolve_edge(Some("junk"), None, RangeBound::Start).is_err());
        assert!(resolve_edge(Some("2024-06-01"), Some("25:99"), RangeBound::Start).is_err());
    }
}
