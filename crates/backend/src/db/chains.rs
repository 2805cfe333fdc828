//! Project chain database operations.

use anyhow::Result;
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};
use shared_types::{ChainSummary, ProjectChain};

use crate::models::NewChain;
use crate::schema::{project_chains, project_nodes, tags};
use crate::services::schedule::DayWindow;

fn summarize(row: (ProjectChain, Option<String>, Option<String>)) -> ChainSummary {
    let (chain, tag_title, tag_color) = row;
    ChainSummary {
        chain,
        tag_title,
        tag_color,
    }
}

pub async fn create(conn: &mut AsyncPgConnection, chain: NewChain<'_>) -> Result<ProjectChain> {
    let row = diesel::insert_into(project_chains::table)
        .values(chain)
        .get_result::<ProjectChain>(conn)
        .await?;

    Ok(row)
}

pub async fn list_all(conn: &mut AsyncPgConnection, user: i32) -> Result<Vec<ChainSummary>> {
    let rows = project_chains::table
        .left_join(tags::table)
        .filter(project_chains::user_id.eq(user))
        .order_by(project_chains::created_at.desc())
        .select((
            project_chains::all_columns,
            tags::title.nullable(),
            tags::color.nullable(),
        ))
        .load::<(ProjectChain, Option<String>, Option<String>)>(conn)
        .await?;

    Ok(rows.into_iter().map(summarize).collect())
}

/// Chains active on the given day, under the same day rule as tasks:
/// starting, ending or spanning the day, or undated.
pub async fn list_for_day(
    conn: &mut AsyncPgConnection,
    user: i32,
    window: DayWindow,
) -> Result<Vec<ChainSummary>> {
    let rows = project_chains::table
        .left_join(tags::table)
        .filter(project_chains::user_id.eq(user))
        .filter(
            project_chains::start_time
                .ge(window.start)
                .and(project_chains::start_time.lt(window.end))
                .or(project_chains::end_time
                    .ge(window.start)
                    .and(project_chains::end_time.lt(window.end)))
                .or(project_chains::start_time
                    .le(window.start)
                    .and(project_chains::end_time.ge(window.end)))
                .or(project_chains::start_time.is_null()),
        )
        .order_by(project_chains::created_at.desc())
        .select((
            project_chains::all_columns,
            tags::title.nullable(),
            tags::color.nullable(),
        ))
        .load::<(ProjectChain, Option<String>, Option<String>)>(conn)
        .await?;

    Ok(rows.into_iter().map(summarize).collect())
}

pub async fn get_by_id(
    conn: &mut AsyncPgConnection,
    user: i32,
    chain: i32,
) -> Result<Option<ChainSummary>> {
    let row = project_chains::table
        .left_join(tags::table)
        .filter(
            project_chains::chain_id
                .eq(chain)
                .and(project_chains::user_id.eq(user)),
        )
        .select((
            project_chains::all_columns,
            tags::title.nullable(),
            tags::color.nullable(),
        ))
        .first::<(ProjectChain, Option<String>, Option<String>)>(conn)
        .await
        .optional()?;

    Ok(row.map(summarize))
}

/// Remove a chain together with all of its nodes. Ownership is checked
/// inside the transaction; the node delete is explicit rather than left
/// to the FK cascade so the removal is one observable unit.
pub async fn delete_with_nodes(
    conn: &mut AsyncPgConnection,
    user: i32,
    chain: i32,
) -> Result<bool> {
    let deleted = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let owned = project_chains::table
                    .filter(
                        project_chains::chain_id
                            .eq(chain)
                            .and(project_chains::user_id.eq(user)),
                    )
                    .select(project_chains::chain_id)
                    .first::<i32>(conn)
                    .await
                    .optional()?;

                if owned.is_none() {
                    return Ok(false);
                }

                diesel::delete(project_nodes::table.filter(project_nodes::chain_id.eq(chain)))
                    .execute(conn)
                    .await?;

                let deleted = diesel::delete(
                    project_chains::table.filter(project_chains::chain_id.eq(chain)),
                )
                .execute(conn)
                .await?;

                Ok(deleted > 0)
            }
            .scope_boxed()
        })
        .await?;

    Ok(deleted)
}
