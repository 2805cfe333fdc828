//! Health tracking handlers: daily logs, weekly summary, goals and
//! appointments.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{Duration, NaiveTime};
use shared_types::{
    AckResponse, AppointmentRequest, AppointmentResponse, AppointmentsResponse, GoalResponse,
    GoalsResponse, HealthSummaryResponse, SaveGoalRequest, SaveHealthLogRequest,
    TodayStatusResponse,
};
use validator::Validate;

use crate::auth::types::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewAppointment, NewHealthGoal, NewHealthLog};
use crate::services::{metrics, schedule};
use crate::AppState;

const GOAL_TYPES: [&str; 4] = ["steps", "sleep", "water", "calories"];
const GOAL_PERIODS: [&str; 2] = ["daily", "weekly"];

/// POST /api/health/logs. Upserts the log for the given (or current) day;
/// profile fields ride along and update the user's health profile.
pub async fn save_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SaveHealthLogRequest>,
) -> ApiResult<Json<AckResponse>> {
    payload.validate()?;
    let day = schedule::resolve_day(payload.date.as_deref())?;

    let mut conn = state.pool.get().await?;
    db::health::upsert_log(
        &mut conn,
        NewHealthLog {
            user_id: user.user_id,
            date: day,
            sleep_hours: payload.sleep_hours,
            steps: payload.steps,
            calories: payload.calories,
            water_intake: payload.water_intake,
            mood: payload.mood,
        },
    )
    .await?;

    if payload.height_cm.is_some()
        || payload.weight_kg.is_some()
        || payload.medical_conditions.is_some()
    {
        let current = db::users::get_by_id(&mut conn, user.user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))?;
        db::users::update_health_profile(
            &mut conn,
            user.user_id,
            payload.height_cm.or(current.height_cm),
            payload.weight_kg.or(current.weight_kg),
            payload
                .medical_conditions
                .as_deref()
                .or(current.medical_conditions.as_deref()),
        )
        .await?;
    }

    Ok(Json(AckResponse::ok()))
}

/// GET /api/health/summary: the last seven days of logs with averages.
pub async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<HealthSummaryResponse>> {
    let since = schedule::today() - Duration::days(6);

    let mut conn = state.pool.get().await?;
    let logs = db::health::logs_since(&mut conn, user.user_id, since).await?;
    let stats = metrics::weekly_stats(&logs);

    Ok(Json(HealthSummaryResponse {
        success: true,
        logs,
        stats,
    }))
}

/// GET /api/health/today: today's log, BMI and the comparison against
/// yesterday.
pub async fn today_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<TodayStatusResponse>> {
    let today = schedule::today();
    let yesterday = today - Duration::days(1);

    let mut conn = state.pool.get().await?;
    let account = db::users::get_by_id(&mut conn, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;
    let today_log = db::health::log_for_date(&mut conn, user.user_id, today).await?;
    let yesterday_log = db::health::log_for_date(&mut conn, user.user_id, yesterday).await?;

    let comparison = metrics::compare_days(today_log.as_ref(), yesterday_log.as_ref());
    let has_data = today_log.is_some();

    Ok(Json(TodayStatusResponse {
        success: true,
        today: today_log,
        bmi: metrics::bmi(account.height_cm, account.weight_kg),
        comparison,
        has_data,
    }))
}

/// POST /api/health/goals: upsert keyed by (user, goal_type, period).
pub async fn save_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SaveGoalRequest>,
) -> ApiResult<Json<GoalResponse>> {
    payload.validate()?;
    if !GOAL_TYPES.contains(&payload.goal_type.as_str()) {
        return Err(ApiError::bad_request(
            "goal_type must be one of steps, sleep, water, calories",
        ));
    }
    if !GOAL_PERIODS.contains(&payload.period.as_str()) {
        return Err(ApiError::bad_request("period must be daily or weekly"));
    }

    let mut conn = state.pool.get().await?;
    let goal = db::health::upsert_goal(
        &mut conn,
        NewHealthGoal {
            user_id: user.user_id,
            goal_type: &payload.goal_type,
            target: payload.target,
            period: &payload.period,
            start_date: payload.start_date,
            end_date: payload.end_date,
            require_every_day: payload.require_every_day.unwrap_or(false),
        },
    )
    .await?;

    Ok(Json(GoalResponse {
        success: true,
        goal,
    }))
}

/// GET /api/health/goals
pub async fn list_goals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<GoalsResponse>> {
    let mut conn = state.pool.get().await?;
    let goals = db::health::list_goals(&mut conn, user.user_id).await?;

    Ok(Json(GoalsResponse {
        success: true,
        goals,
    }))
}

fn parse_appointment_time(raw: Option<&str>) -> ApiResult<Option<NaiveTime>> {
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| {
            NaiveTime::parse_from_str(s.trim(), "%H:%M")
                .map_err(|_| ApiError::bad_request(format!("invalid time `{s}`, expected HH:MM")))
        })
        .transpose()
}

/// POST /api/health/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AppointmentRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    payload.validate()?;
    let date = schedule::parse_date(&payload.appointment_date)?;
    let time = parse_appointment_time(payload.appointment_time.as_deref())?;

    let mut conn = state.pool.get().await?;
    let appointment = db::health::create_appointment(
        &mut conn,
        NewAppointment {
            user_id: user.user_id,
            appointment_date: date,
            appointment_time: time,
            reason: &payload.reason,
            medical_condition: payload.medical_condition.as_deref(),
            notes: payload.notes.as_deref(),
            status: payload.status.as_deref().unwrap_or("scheduled"),
        },
    )
    .await?;

    Ok(Json(AppointmentResponse {
        success: true,
        appointment,
    }))
}

/// GET /api/health/appointments: today-or-later, ordered by date then time.
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<AppointmentsResponse>> {
    let mut conn = state.pool.get().await?;
    let appointments =
        db::health::list_appointments(&mut conn, user.user_id, schedule::today()).await?;

    Ok(Json(AppointmentsResponse {
        success: true,
        appointments,
    }))
}

/// GET /api/health/appointments/:id
pub async fn get_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(appointment_id): Path<i32>,
) -> ApiResult<Json<AppointmentResponse>> {
    let mut conn = state.pool.get().await?;

    let appointment = db::health::get_appointment(&mut conn, user.user_id, appointment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Appointment"))?;

    Ok(Json(AppointmentResponse {
        success: true,
        appointment,
    }))
}

/// POST /api/health/appointments/:id
pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(appointment_id): Path<i32>,
    Json(payload): Json<AppointmentRequest>,
) -> ApiResult<Json<AppointmentResponse>> {
    payload.validate()?;
    let date = schedule::parse_date(&payload.appointment_date)?;
    let time = parse_appointment_time(payload.appointment_time.as_deref())?;

    let mut conn = state.pool.get().await?;
    let appointment = db::health::update_appointment(
        &mut conn,
        user.user_id,
        appointment_id,
        date,
        time,
        &payload.reason,
        payload.medical_condition.as_deref(),
        payload.notes.as_deref(),
        payload.status.as_deref().unwrap_or("scheduled"),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Appointment"))?;

    Ok(Json(AppointmentResponse {
        success: true,
        appointment,
    }))
}

/// DELETE /api/health/appointments/:id
pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(appointment_id): Path<i32>,
) -> ApiResult<Json<AckResponse>> {
    let mut conn = state.pool.get().await?;

    if !db::health::delete_appointment(&mut conn, user.user_id, appointment_id).await? {
        return Err(ApiError::not_found("Appointment"));
    }
    Ok(Json(AckResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_time_parses_or_rejects() {
        assert_eq!(
            parse_appointment_time(Some("09:30")).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0)
        );
        assert_eq!(parse_appointment_time(None).unwrap(), None);
        assert_eq!(parse_appointment_time(Some("  ")).unwrap(), None);
        assert!(parse_appointment_time(Some("9am")).is_err());
    }

    #[test]
    fn goal_vocabulary_is_closed() {
        assert!(GOAL_TYPES.contains(&"steps"));
        assert!(!GOAL_TYPES.contains(&"weight"));
        assert!(GOAL_PERIODS.contains(&"weekly"));
        assert!(!GOAL_PERIODS.contains(&"monthly"));
    }
}
