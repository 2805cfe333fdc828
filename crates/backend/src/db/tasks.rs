//! Task database operations, including the day-scoped listing query.

use anyhow::Result;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use shared_types::{Task, TaskWithTag};

use crate::models::NewTask;
use crate::schema::{tags, tasks};
use crate::services::schedule::{DayWindow, TaskSort};

fn with_tag(row: (Task, Option<String>, Option<String>)) -> TaskWithTag {
    let (task, tag_title, tag_color) = row;
    TaskWithTag {
        task_id: task.task_id,
        title: task.title,
        note: task.note,
        start_time: task.start_time,
        end_time: task.end_time,
        priority: task.priority,
        is_done: task.is_done,
        tag_id: task.tag_id,
        created_at: task.created_at,
        tag_title,
        tag_color,
    }
}

pub async fn create(conn: &mut AsyncPgConnection, task: NewTask<'_>) -> Result<Task> {
    let row = diesel::insert_into(tasks::table)
        .values(task)
        .get_result::<Task>(conn)
        .await?;

    Ok(row)
}

/// Tasks active on the given day: starting, ending or spanning it, plus
/// unscheduled tasks which are treated as always due. One sort key is
/// applied; ascending text sorts put null tag titles last (Postgres
/// default for ASC).
pub async fn list_for_day(
    conn: &mut AsyncPgConnection,
    user: i32,
    window: DayWindow,
    sort: TaskSort,
) -> Result<Vec<TaskWithTag>> {
    let mut query = tasks::table
        .left_join(tags::table)
        .filter(tasks::user_id.eq(user))
        .filter(
            tasks::start_time
                .ge(window.start)
                .and(tasks::start_time.lt(window.end))
                .or(tasks::end_time
                    .ge(window.start)
                    .and(tasks::end_time.lt(window.end)))
                .or(tasks::start_time
                    .le(window.start)
                    .and(tasks::end_time.ge(window.end)))
                .or(tasks::start_time.is_null()),
        )
        .select((
            tasks::all_columns,
            tags::title.nullable(),
            tags::color.nullable(),
        ))
        .into_boxed();

    query = match sort {
        TaskSort::Start => query.order_by(tasks::start_time.asc()),
        TaskSort::End => query.order_by(tasks::end_time.asc()),
        TaskSort::Tag => query.order_by(tags::title.asc()),
        TaskSort::Done => query.order_by(tasks::is_done.asc()),
        TaskSort::Title => query.order_by(tasks::title.asc()),
    };

    let rows = query
        .load::<(Task, Option<String>, Option<String>)>(conn)
        .await?;

    Ok(rows.into_iter().map(with_tag).collect())
}

pub async fn get_by_id(
    conn: &mut AsyncPgConnection,
    user: i32,
    task: i32,
) -> Result<Option<TaskWithTag>> {
    let row = tasks::table
        .left_join(tags::table)
        .filter(tasks::task_id.eq(task).and(tasks::user_id.eq(user)))
        .select((
            tasks::all_columns,
            tags::title.nullable(),
            tags::color.nullable(),
        ))
        .first::<(Task, Option<String>, Option<String>)>(conn)
        .await
        .optional()?;

    Ok(row.map(with_tag))
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    conn: &mut AsyncPgConnection,
    user: i32,
    task: i32,
    title_val: &str,
    note_val: Option<&str>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    priority_val: Option<&str>,
    tag: Option<i32>,
) -> Result<bool> {
    let updated = diesel::update(
        tasks::table.filter(tasks::task_id.eq(task).and(tasks::user_id.eq(user))),
    )
    .set((
        tasks::title.eq(title_val),
        tasks::note.eq(note_val),
        tasks::start_time.eq(start),
        tasks::end_time.eq(end),
        tasks::priority.eq(priority_val),
        tasks::tag_id.eq(tag),
    ))
    .execute(conn)
    .await?;

    Ok(updated > 0)
}

pub async fn set_done(
    conn: &mut AsyncPgConnection,
    user: i32,
    task: i32,
    done: bool,
) -> Result<bool> {
    let updated = diesel::update(
        tasks::table.filter(tasks::task_id.eq(task).and(tasks::user_id.eq(user))),
    )
    .set(tasks::is_done.eq(done))
    .execute(conn)
    .await?;

    Ok(updated > 0)
}

pub async fn delete(conn: &mut AsyncPgConnection, user: i32, task: i32) -> Result<bool> {
    let deleted = diesel::delete(
        tasks::table.filter(tasks::task_id.eq(task).and(tasks::user_id.eq(user))),
    )
    .execute(conn)
    .await?;

    Ok(deleted > 0)
}
