//! Project chain and node handlers.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared_types::{
    AckResponse, ChainsResponse, CreateChainRequest, CreateNodeRequest, NodeDetail, NodeResponse,
    ProjectDetail, ProjectDetailResponse, ToggleRequest, UpdateNodeRequest,
};
use validator::Validate;

use crate::auth::types::AuthUser;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewChain, NewNode};
use crate::services::hierarchy;
use crate::services::schedule::{self, RangeBound};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

type TimeRange = (Option<DateTime<Utc>>, Option<DateTime<Utc>>);

fn normalize_range(start: Option<&str>, end: Option<&str>) -> ApiResult<TimeRange> {
    let start = start
        .filter(|s| !s.trim().is_empty())
        .map(|s| schedule::normalize_timestamp(s, RangeBound::Start))
        .transpose()?;
    let end = end
        .filter(|s| !s.trim().is_empty())
        .map(|s| schedule::normalize_timestamp(s, RangeBound::End))
        .transpose()?;
    Ok((start, end))
}

/// GET /api/projects, optionally day-scoped with `?date=YYYY-MM-DD`.
pub async fn list_chains(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<DayQuery>,
) -> ApiResult<Json<ChainsResponse>> {
    let mut conn = state.pool.get().await?;

    let chains = match query.date.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => {
            let day = schedule::parse_date(raw)?;
            db::chains::list_for_day(&mut conn, user.user_id, schedule::day_window(day)).await?
        }
        None => db::chains::list_all(&mut conn, user.user_id).await?,
    };

    Ok(Json(ChainsResponse {
        success: true,
        chains,
    }))
}

/// POST /api/projects
pub async fn create_chain(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateChainRequest>,
) -> ApiResult<Json<ProjectDetailResponse>> {
    payload.validate()?;
    let (start, end) = normalize_range(payload.start_time.as_deref(), payload.end_time.as_deref())?;

    let mut conn = state.pool.get().await?;
    let chain = db::chains::create(
        &mut conn,
        NewChain {
            user_id: user.user_id,
            title: &payload.title,
            description: payload.description.as_deref(),
            color: payload.color.as_deref(),
            priority: payload.priority.as_deref(),
            start_time: start,
            end_time: end,
            tag_id: payload.tag_id,
        },
    )
    .await?;

    tracing::info!(chain_id = chain.chain_id, "created project chain");

    let summary = db::chains::get_by_id(&mut conn, user.user_id, chain.chain_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project"))?;

    Ok(Json(ProjectDetailResponse {
        success: true,
        project: ProjectDetail {
            chain: summary.chain,
            tag_title: summary.tag_title,
            tag_color: summary.tag_color,
            nodes: vec![],
            tree: vec![],
        },
    }))
}

/// GET /api/projects/:id
pub async fn get_chain(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(chain_id): Path<i32>,
) -> ApiResult<Json<ProjectDetailResponse>> {
    let mut conn = state.pool.get().await?;

    let summary = db::chains::get_by_id(&mut conn, user.user_id, chain_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project"))?;
    let nodes = db::nodes::list_for_chain(&mut conn, chain_id).await?;
    let tree = hierarchy::build_tree(&nodes);

    Ok(Json(ProjectDetailResponse {
        success: true,
        project: ProjectDetail {
            chain: summary.chain,
            tag_title: summary.tag_title,
            tag_color: summary.tag_color,
            nodes,
            tree,
        },
    }))
}

/// DELETE /api/projects/:id
pub async fn delete_chain(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(chain_id): Path<i32>,
) -> ApiResult<Json<AckResponse>> {
    let mut conn = state.pool.get().await?;

    if !db::chains::delete_with_nodes(&mut conn, user.user_id, chain_id).await? {
        return Err(ApiError::not_found("Project"));
    }

    tracing::info!(chain_id, "deleted project chain");
    Ok(Json(AckResponse::ok()))
}

/// POST /api/projects/:id/nodes
pub async fn create_node(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(chain_id): Path<i32>,
    Json(payload): Json<CreateNodeRequest>,
) -> ApiResult<Json<NodeResponse>> {
    payload.validate()?;

    let mut conn = state.pool.get().await?;
    if db::chains::get_by_id(&mut conn, user.user_id, chain_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Project"));
    }

    if let Some(parent) = payload.parent_id {
        if !db::nodes::parent_in_chain(&mut conn, chain_id, parent).await? {
            return Err(ApiError::bad_request("Parent node is not in this project"));
        }
    }

    let (start, end) = normalize_range(payload.start_time.as_deref(), payload.end_time.as_deref())?;
    let order_index = db::nodes::next_order_index(&mut conn, chain_id, payload.parent_id).await?;

    let node = db::nodes::create(
        &mut conn,
        NewNode {
            chain_id,
            parent_id: payload.parent_id,
            title: &payload.title,
            note: payload.note.as_deref().unwrap_or(""),
            is_done: false,
            order_index,
            priority: payload.priority.as_deref(),
            tag_id: payload.tag_id,
            start_time: start,
            end_time: end,
        },
    )
    .await?;

    let tag_title = match node.tag_id {
        Some(tag) => db::tags::get_by_id(&mut conn, user.user_id, tag)
            .await?
            .map(|t| t.title),
        None => None,
    };

    Ok(Json(NodeResponse {
        success: true,
        node: NodeDetail {
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
        },
    }))
}

/// POST /api/nodes/:id
pub async fn update_node(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(node_id): Path<i32>,
    Json(payload): Json<UpdateNodeRequest>,
) -> ApiResult<Json<AckResponse>> {
    payload.validate()?;
    let (start, end) = normalize_range(payload.start_time.as_deref(), payload.end_time.as_deref())?;

    let mut conn = state.pool.get().await?;
    let updated = db::nodes::update(
        &mut conn,
        user.user_id,
        node_id,
        &payload.title,
        payload.note.as_deref().unwrap_or(""),
        payload.priority.as_deref(),
        payload.tag_id,
        start,
        end,
    )
    .await?;

    if !updated {
        return Err(ApiError::not_found("Node"));
    }
    Ok(Json(AckResponse::ok()))
}

/// POST /api/nodes/:id/toggle
pub async fn toggle_node(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(node_id): Path<i32>,
    Json(payload): Json<ToggleRequest>,
) -> ApiResult<Json<AckResponse>> {
    let mut conn = state.pool.get().await?;

    if !db::nodes::set_done(&mut conn, user.user_id, node_id, payload.is_done).await? {
        return Err(ApiError::not_found("Node"));
    }
    Ok(Json(AckResponse::ok()))
}

/// DELETE /api/nodes/:id, removing the node's whole subtree.
pub async fn delete_node(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(node_id): Path<i32>,
) -> ApiResult<Json<AckResponse>> {
    let mut conn = state.pool.get().await?;

    if !db::nodes::delete_subtree(&mut conn, user.user_id, node_id).await? {
        return Err(ApiError::not_found("Node"));
    }

    tracing::info!(node_id, "deleted node subtree");
    Ok(Json(AckResponse::ok()))
}
