use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{HealthAppointment, HealthGoal, HealthLog, ProjectChain, Tag};

// ============================================================================
// Auth API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUserResponse {
    pub success: bool,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
}

// ============================================================================
// Project Chain / Node API Types
// ============================================================================

/// Bare dates (`YYYY-MM-DD`) in `start_time`/`end_time` are normalized
/// server-side by appending the default time-of-day and UTC+7 offset.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateChainRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub color: Option<String>,
    pub priority: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub tag_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateNodeRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub note: Option<String>,

    pub priority: Option<String>,
    pub tag_id: Option<i32>,
    pub parent_id: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Pure field replacement; never touches `order_index` or `parent_id`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateNodeRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub note: Option<String>,

    pub priority: Option<String>,
    pub tag_id: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub is_done: bool,
}

/// A node as returned inside a project detail: flat, with the tag title
/// denormalized. Tree structure is reconstructed from `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDetail {
    pub node_id: i32,
    pub title: String,
    pub note: String,
    pub is_done: bool,
    pub order_index: i32,
    pub priority: Option<String>,
    pub tag_id: Option<i32>,
    pub tag_title: Option<String>,
    pub parent_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeResponse {
    pub success: bool,
    pub node: NodeDetail,
}

/// A node with its children nested beneath it, siblings in ascending
/// `order_index` order.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeTree {
    #[serde(flatten)]
    pub node: NodeDetail,
    pub children: Vec<NodeTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSummary {
    #[serde(flatten)]
    pub chain: ProjectChain,
    pub tag_title: Option<String>,
    pub tag_color: Option<String>,
}

/// Full project payload: the chain row, its nodes flat in `order_index`
/// order, and the same nodes assembled into a tree.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub chain: ProjectChain,
    pub tag_title: Option<String>,
    pub tag_color: Option<String>,
    pub nodes: Vec<NodeDetail>,
    pub tree: Vec<NodeTree>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChainsResponse {
    pub success: bool,
    pub chains: Vec<ChainSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    pub success: bool,
    pub project: ProjectDetail,
}

// ============================================================================
// Task API Types
// ============================================================================

/// Bare `HH:MM` times are anchored to today's date in the app offset.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub note: Option<String>,

    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub priority: Option<String>,
    pub tag_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub note: Option<String>,

    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub priority: Option<String>,
    pub tag_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithTag {
    pub task_id: i32,
    pub title: String,
    pub note: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub priority: Option<String>,
    pub is_done: bool,
    pub tag_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub tag_title: Option<String>,
    pub tag_color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TasksResponse {
    pub success: bool,
    pub tasks: Vec<TaskWithTag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDetailResponse {
    pub success: bool,
    pub task: TaskWithTag,
}

// ============================================================================
// Tag API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TagRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1, max = 32))]
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    pub success: bool,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagResponse {
    pub success: bool,
    pub tag: Tag,
}

// ============================================================================
// Health API Types
// ============================================================================

/// Upsert body for a daily health log. Profile fields ride along so the
/// log form can update height/weight in the same submit.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveHealthLogRequest {
    pub date: Option<String>,

    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_hours: Option<f64>,

    #[validate(range(min = 0))]
    pub steps: Option<i32>,

    #[validate(range(min = 0))]
    pub calories: Option<i32>,

    #[validate(range(min = 0.0))]
    pub water_intake: Option<f64>,

    #[validate(range(min = 1, max = 5))]
    pub mood: Option<i32>,

    #[validate(range(min = 1.0))]
    pub height_cm: Option<f64>,

    #[validate(range(min = 1.0))]
    pub weight_kg: Option<f64>,

    #[validate(length(max = 2000))]
    pub medical_conditions: Option<String>,
}

/// Last-7-day averages; all None when no logs exist.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub avg_sleep: Option<f64>,
    pub avg_steps: Option<i64>,
    pub avg_calories: Option<i64>,
    pub avg_water: Option<f64>,
    pub avg_mood: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthSummaryResponse {
    pub success: bool,
    pub logs: Vec<HealthLog>,
    pub stats: WeeklyStats,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveGoalRequest {
    pub goal_type: String,

    #[validate(range(min = 0.000001))]
    pub target: f64,

    pub period: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub require_every_day: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalsResponse {
    pub success: bool,
    pub goals: Vec<HealthGoal>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalResponse {
    pub success: bool,
    pub goal: HealthGoal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AppointmentRequest {
    pub appointment_date: String,
    pub appointment_time: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub reason: String,

    #[validate(length(max = 2000))]
    pub medical_condition: Option<String>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,

    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentsResponse {
    pub success: bool,
    pub appointments: Vec<HealthAppointment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub success: bool,
    pub appointment: HealthAppointment,
}

/// Direction of change for one metric relative to yesterday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improved,
    Declined,
    Increased,
    Decreased,
    NoData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayComparison {
    pub sleep: Trend,
    pub steps: Trend,
    pub calories: Trend,
    pub water: Trend,
    pub mood: Trend,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayStatusResponse {
    pub success: bool,
    pub today: Option<HealthLog>,
    pub bmi: Option<f64>,
    pub comparison: TodayComparison,
    pub has_data: bool,
}

// ============================================================================
// Profile API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(range(min = 1.0))]
    pub height_cm: Option<f64>,

    #[validate(range(min = 1.0))]
    pub weight_kg: Option<f64>,

    #[validate(length(max = 2000))]
    pub medical_conditions: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub full_name: String,
    pub email: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub medical_conditions: Option<String>,
    pub history: Vec<crate::models::HealthProfileEntry>,
}

// ============================================================================
// Assistant API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ChatIntentRequest {
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CalorieEstimateRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct MealPlanRequest {
    #[validate(length(min = 1, max = 1000))]
    pub goal: String,

    #[validate(length(max = 1000))]
    pub condition: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SymptomCheckRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantAnswerResponse {
    pub success: bool,
    pub answer: String,
}

/// Bare `{success}` acknowledgement used by mutation endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        AckResponse { success: true }
    }
}
