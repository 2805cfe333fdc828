// Insertable structs for Diesel
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub color: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub note: Option<&'a str>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub priority: Option<&'a str>,
    pub is_done: bool,
    pub tag_id: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::project_chains)]
pub struct NewChain<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub color: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub tag_id: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::project_nodes)]
pub struct NewNode<'a> {
    pub chain_id: i32,
    pub parent_id: Option<i32>,
    pub title: &'a str,
    pub note: &'a str,
    pub is_done: bool,
    pub order_index: i32,
    pub priority: Option<&'a str>,
    pub tag_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::health_logs)]
pub struct NewHealthLog {
    pub user_id: i32,
    pub date: NaiveDate,
    pub sleep_hours: Option<f64>,
    pub steps: Option<i32>,
    pub calories: Option<i32>,
    pub water_intake: Option<f64>,
    pub mood: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::health_goals)]
pub struct NewHealthGoal<'a> {
    pub user_id: i32,
    pub goal_type: &'a str,
    pub target: f64,
    pub period: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub require_every_day: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::health_appointments)]
pub struct NewAppointment<'a> {
    pub user_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: Option<NaiveTime>,
    pub reason: &'a str,
    pub medical_condition: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub status: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::user_health_profile_history)]
pub struct NewProfileEntry<'a> {
    pub user_id: i32,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub medical_conditions: Option<&'a str>,
}
