//! Project node database operations.
//!
//! Nodes carry no user column; ownership flows through the parent chain,
//! so every node lookup is scoped with a chain-ownership subquery.

use anyhow::Result;
use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};
use shared_types::{NodeDetail, ProjectNode};

use crate::models::NewNode;
use crate::schema::{project_chains, project_nodes, tags};
use crate::services::hierarchy;

fn detail(row: (ProjectNode, Option<String>)) -> NodeDetail {
    let (node, tag_title) = row;
    NodeDetail {
        node_id: node.node_id,
        title: node.title,
        note: node.note,
        is_done: node.is_done,
        order_index: node.order_index,
        priority: node.priority,
        tag_id: node.tag_id,
        tag_title,
        parent_id: node.parent_id,
        start_time: node.start_time,
        end_time: node.end_time,
    }
}

pub async fn list_for_chain(conn: &mut AsyncPgConnection, chain: i32) -> Result<Vec<NodeDetail>> {
    let rows = project_nodes::table
        .left_join(tags::table)
        .filter(project_nodes::chain_id.eq(chain))
        .order_by(project_nodes::order_index.asc())
        .select((project_nodes::all_columns, tags::title.nullable()))
        .load::<(ProjectNode, Option<String>)>(conn)
        .await?;

    Ok(rows.into_iter().map(detail).collect())
}

/// Next slot in the sibling group under `parent` (root group for None).
/// `IS NOT DISTINCT FROM` keeps the null parent comparable.
pub async fn next_order_index(
    conn: &mut AsyncPgConnection,
    chain: i32,
    parent: Option<i32>,
) -> Result<i32> {
    let current = project_nodes::table
        .filter(
            project_nodes::chain_id
                .eq(chain)
                .and(project_nodes::parent_id.is_not_distinct_from(parent)),
        )
        .select(max(project_nodes::order_index))
        .first::<Option<i32>>(conn)
        .await?;

    Ok(current.map_or(0, |n| n + 1))
}

pub async fn parent_in_chain(
    conn: &mut AsyncPgConnection,
    chain: i32,
    parent: i32,
) -> Result<bool> {
    let found = project_nodes::table
        .filter(
            project_nodes::node_id
                .eq(parent)
                .and(project_nodes::chain_id.eq(chain)),
        )
        .select(project_nodes::node_id)
        .first::<i32>(conn)
        .await
        .optional()?;

    Ok(found.is_some())
}

pub async fn create(conn: &mut AsyncPgConnection, node: NewNode<'_>) -> Result<ProjectNode> {
    let row = diesel::insert_into(project_nodes::table)
        .values(node)
        .get_result::<ProjectNode>(conn)
        .await?;

    Ok(row)
}

pub async fn get_scoped(
    conn: &mut AsyncPgConnection,
    user: i32,
    node: i32,
) -> Result<Option<ProjectNode>> {
    let owned_chains = project_chains::table
        .filter(project_chains::user_id.eq(user))
        .select(project_chains::chain_id);

    let row = project_nodes::table
        .filter(
            project_nodes::node_id
                .eq(node)
                .and(project_nodes::chain_id.eq_any(owned_chains)),
        )
        .first::<ProjectNode>(conn)
        .await
        .optional()?;

    Ok(row)
}

/// Field replacement only. `parent_id` and `order_index` are never updated
/// here, which keeps reparenting cycles unrepresentable through this path.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    conn: &mut AsyncPgConnection,
    user: i32,
    node: i32,
    title_val: &str,
    note_val: &str,
    priority_val: Option<&str>,
    tag: Option<i32>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<bool> {
    let owned_chains = project_chains::table
        .filter(project_chains::user_id.eq(user))
        .select(project_chains::chain_id);

    let updated = diesel::update(
        project_nodes::table.filter(
            project_nodes::node_id
                .eq(node)
                .and(project_nodes::chain_id.eq_any(owned_chains)),
        ),
    )
    .set((
        project_nodes::title.eq(title_val),
        project_nodes::note.eq(note_val),
        project_nodes::priority.eq(priority_val),
        project_nodes::tag_id.eq(tag),
        project_nodes::start_time.eq(start),
        project_nodes::end_time.eq(end),
    ))
    .execute(conn)
    .await?;

    Ok(updated > 0)
}

pub async fn set_done(
    conn: &mut AsyncPgConnection,
    user: i32,
    node: i32,
    done: bool,
) -> Result<bool> {
    let owned_chains = project_chains::table
        .filter(project_chains::user_id.eq(user))
        .select(project_chains::chain_id);

    let updated = diesel::update(
        project_nodes::table.filter(
            project_nodes::node_id
                .eq(node)
                .and(project_nodes::chain_id.eq_any(owned_chains)),
        ),
    )
    .set(project_nodes::is_done.eq(done))
    .execute(conn)
    .await?;

    Ok(updated > 0)
}

/// Delete a node and its whole subtree in one transaction. The subtree is
/// resolved in memory from the chain's parent links; the FK cascade on
/// `parent_id` backstops anything a concurrent insert slips in.
pub async fn delete_subtree(conn: &mut AsyncPgConnection, user: i32, node: i32) -> Result<bool> {
    let deleted = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let owned_chains = project_chains::table
                    .filter(project_chains::user_id.eq(user))
                    .select(project_chains::chain_id);

                let chain = project_nodes::table
                    .filter(
                        project_nodes::node_id
                            .eq(node)
                            .and(project_nodes::chain_id.eq_any(owned_chains)),
                    )
                    .select(project_nodes::chain_id)
                    .first::<i32>(conn)
                    .await
                    .optional()?;

                let Some(chain) = chain else {
                    return Ok(false);
                };

                let links = project_nodes::table
                    .filter(project_nodes::chain_id.eq(chain))
                    .select((project_nodes::node_id, project_nodes::parent_id))
                    .load::<(i32, Option<i32>)>(conn)
                    .await?;

                let subtree = hierarchy::collect_subtree(&links, node);
                diesel::delete(project_nodes::table.filter(project_nodes::node_id.eq_any(subtree)))
                    .execute(conn)
                    .await?;

                Ok(true)
            }
            .scope_boxed()
        })
        .await?;

    Ok(deleted)
}
