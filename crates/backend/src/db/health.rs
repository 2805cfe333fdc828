//! Health tracking database operations: daily logs, goals and appointments.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use shared_types::{HealthAppointment, HealthGoal, HealthLog};

use crate::models::{NewAppointment, NewHealthGoal, NewHealthLog};

/// One row per user per day; a second save for the same day overwrites
/// the previous values.
pub async fn upsert_log(conn: &mut AsyncPgConnection, log: NewHealthLog) -> Result<HealthLog> {
    use crate::schema::health_logs::dsl::*;

    let row = diesel::insert_into(health_logs)
        .values(log)
        .on_conflict((user_id, date))
        .do_update()
        .set((
            sleep_hours.eq(excluded(sleep_hours)),
            steps.eq(excluded(steps)),
            calories.eq(excluded(calories)),
            water_intake.eq(excluded(water_intake)),
            mood.eq(excluded(mood)),
        ))
        .get_result::<HealthLog>(conn)
        .await?;

    Ok(row)
}

pub async fn logs_since(
    conn: &mut AsyncPgConnection,
    user: i32,
    since: NaiveDate,
) -> Result<Vec<HealthLog>> {
    use crate::schema::health_logs::dsl::*;

    let rows = health_logs
        .filter(user_id.eq(user).and(date.ge(since)))
        .order_by(date.asc())
        .load::<HealthLog>(conn)
        .await?;

    Ok(rows)
}

pub async fn log_for_date(
    conn: &mut AsyncPgConnection,
    user: i32,
    day: NaiveDate,
) -> Result<Option<HealthLog>> {
    use crate::schema::health_logs::dsl::*;

    let row = health_logs
        .filter(user_id.eq(user).and(date.eq(day)))
        .first::<HealthLog>(conn)
        .await
        .optional()?;

    Ok(row)
}

/// One goal per (user, type, period); saving again replaces the target
/// and schedule.
pub async fn upsert_goal(
    conn: &mut AsyncPgConnection,
    goal: NewHealthGoal<'_>,
) -> Result<HealthGoal> {
    use crate::schema::health_goals::dsl::*;

    let row = diesel::insert_into(health_goals)
        .values(goal)
        .on_conflict((user_id, goal_type, period))
        .do_update()
        .set((
            target.eq(excluded(target)),
            start_date.eq(excluded(start_date)),
            end_date.eq(excluded(end_date)),
            require_every_day.eq(excluded(require_every_day)),
        ))
        .get_result::<HealthGoal>(conn)
        .await?;

    Ok(row)
}

pub async fn list_goals(conn: &mut AsyncPgConnection, user: i32) -> Result<Vec<HealthGoal>> {
    use crate::schema::health_goals::dsl::*;

    let rows = health_goals
        .filter(user_id.eq(user))
        .order_by(goal_id.asc())
        .load::<HealthGoal>(conn)
        .await?;

    Ok(rows)
}

pub async fn create_appointment(
    conn: &mut AsyncPgConnection,
    appointment: NewAppointment<'_>,
) -> Result<HealthAppointment> {
    use crate::schema::health_appointments::dsl::*;

    let row = diesel::insert_into(health_appointments)
        .values(appointment)
        .get_result::<HealthAppointment>(conn)
        .await?;

    Ok(row)
}

/// Upcoming appointments only: `since` cuts off anything before today.
pub async fn list_appointments(
    conn: &mut AsyncPgConnection,
    user: i32,
    since: NaiveDate,
) -> Result<Vec<HealthAppointment>> {
    use crate::schema::health_appointments::dsl::*;

    let rows = health_appointments
        .filter(user_id.eq(user).and(appointment_date.ge(since)))
        .order_by((appointment_date.asc(), appointment_time.asc()))
        .load::<HealthAppointment>(conn)
        .await?;

    Ok(rows)
}

pub async fn get_appointment(
    conn: &mut AsyncPgConnection,
    user: i32,
    appointment: i32,
) -> Result<Option<HealthAppointment>> {
    use crate::schema::health_appointments::dsl::*;

    let row = health_appointments
        .filter(id.eq(appointment).and(user_id.eq(user)))
        .first::<HealthAppointment>(conn)
        .await
        .optional()?;

    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub async fn update_appointment(
    conn: &mut AsyncPgConnection,
    user: i32,
    appointment: i32,
    date: NaiveDate,
    time: Option<NaiveTime>,
    reason_val: &str,
    condition: Option<&str>,
    notes_val: Option<&str>,
    status_val: &str,
) -> Result<Option<HealthAppointment>> {
    use crate::schema::health_appointments::dsl::*;

    let row = diesel::update(
        health_appointments.filter(id.eq(appointment).and(user_id.eq(user))),
    )
    .set((
        appointment_date.eq(date),
        appointment_time.eq(time),
        reason.eq(reason_val),
        medical_condition.eq(condition),
        notes.eq(notes_val),
        status.eq(status_val),
        updated_at.eq(diesel::dsl::now),
    ))
    .get_result::<HealthAppointment>(conn)
    .await
    .optional()?;

    Ok(row)
}

pub async fn delete_appointment(
    conn: &mut AsyncPgConnection,
    user: i32,
    appointment: i32,
) -> Result<bool> {
    use crate::schema::health_appointments::dsl::*;

    let deleted =
        diesel::delete(health_appointments.filter(id.eq(appointment).and(user_id.eq(user))))
            .execute(conn)
            .await?;

    Ok(deleted > 0)
}
