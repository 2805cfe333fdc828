use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user. Health profile fields (height/weight/conditions) live
/// here so assistant prompts can pick them up without a join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct User {
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub medical_conditions: Option<String>,
}

/// User-scoped label, attachable to tasks, chains and nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Tag {
    pub tag_id: i32,
    pub user_id: i32,
    pub title: String,
    pub color: String,
}

/// Flat schedulable item. No hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Task {
    pub task_id: i32,
    pub user_id: i32,
    pub title: String,
    pub note: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub priority: Option<String>,
    pub is_done: bool,
    pub tag_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A project. Root entity of the node hierarchy; owns its nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct ProjectChain {
    pub chain_id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub priority: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub tag_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A step within a chain. `parent_id` is null for root-level nodes;
/// `order_index` ranks a node among siblings sharing the same parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct ProjectNode {
    pub node_id: i32,
    pub chain_id: i32,
    pub parent_id: Option<i32>,
    pub title: String,
    pub note: String,
    pub is_done: bool,
    pub order_index: i32,
    pub priority: Option<String>,
    pub tag_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// One row per (user, calendar date). Repeated saves upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct HealthLog {
    pub log_id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub sleep_hours: Option<f64>,
    pub steps: Option<i32>,
    pub calories: Option<i32>,
    pub water_intake: Option<f64>,
    pub mood: Option<i32>,
}

/// Target value for a health metric, keyed by (user, goal_type, period).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct HealthGoal {
    pub goal_id: i32,
    pub user_id: i32,
    pub goal_type: String,
    pub target: f64,
    pub period: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub require_every_day: bool,
}

/// User-scoped medical calendar entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct HealthAppointment {
    pub id: i32,
    pub user_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: Option<NaiveTime>,
    pub reason: String,
    pub medical_condition: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only record of height/weight changes, for trend charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct HealthProfileEntry {
    pub id: i32,
    pub user_id: i32,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub medical_conditions: Option<String>,
    pub created_at: DateTime<Utc>,
}
