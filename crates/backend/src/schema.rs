// Diesel table definitions for the LifeSync schema.
// Kept in sync with migrations/0001_init.sql by hand.

diesel::table! {
    users (user_id) {
        user_id -> Int4,
        full_name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
        height_cm -> Nullable<Float8>,
        weight_kg -> Nullable<Float8>,
        medical_conditions -> Nullable<Text>,
    }
}

diesel::table! {
    tags (tag_id) {
        tag_id -> Int4,
        user_id -> Int4,
        title -> Varchar,
        color -> Varchar,
    }
}

diesel::table! {
    tasks (task_id) {
        task_id -> Int4,
        user_id -> Int4,
        title -> Varchar,
        note -> Nullable<Text>,
        start_time -> Nullable<Timestamptz>,
        end_time -> Nullable<Timestamptz>,
        priority -> Nullable<Varchar>,
        is_done -> Bool,
        tag_id -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    project_chains (chain_id) {
        chain_id -> Int4,
        user_id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        color -> Nullable<Varchar>,
        priority -> Nullable<Varchar>,
        start_time -> Nullable<Timestamptz>,
        end_time -> Nullable<Timestamptz>,
        tag_id -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    project_nodes (node_id) {
        node_id -> Int4,
        chain_id -> Int4,
        parent_id -> Nullable<Int4>,
        title -> Varchar,
        note -> Text,
        is_done -> Bool,
        order_index -> Int4,
        priority -> Nullable<Varchar>,
        tag_id -> Nullable<Int4>,
        start_time -> Nullable<Timestamptz>,
        end_time -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    health_logs (log_id) {
        log_id -> Int4,
        user_id -> Int4,
        date -> Date,
        sleep_hours -> Nullable<Float8>,
        steps -> Nullable<Int4>,
        calories -> Nullable<Int4>,
        water_intake -> Nullable<Float8>,
        mood -> Nullable<Int4>,
    }
}

diesel::table! {
    health_goals (goal_id) {
        goal_id -> Int4,
        user_id -> Int4,
        goal_type -> Varchar,
        target -> Float8,
        period -> Varchar,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        require_every_day -> Bool,
    }
}

diesel::table! {
    health_appointments (id) {
        id -> Int4,
        user_id -> Int4,
        appointment_date -> Date,
        appointment_time -> Nullable<Time>,
        reason -> Varchar,
        medical_condition -> Nullable<Text>,
        notes -> Nullable<Text>,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_health_profile_history (id) {
        id -> Int4,
        user_id -> Int4,
        height_cm -> Nullable<Float8>,
        weight_kg -> Nullable<Float8>,
        medical_conditions -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

// project_nodes.parent_id self-references project_nodes, which joinable!
// cannot express; sibling lookups filter on it directly instead.
diesel::joinable!(tags -> users (user_id));
diesel::joinable!(tasks -> users (user_id));
diesel::joinable!(tasks -> tags (tag_id));
diesel::joinable!(project_chains -> users (user_id));
diesel::joinable!(project_chains -> tags (tag_id));
diesel::joinable!(project_nodes -> project_chains (chain_id));
diesel::joinable!(project_nodes -> tags (tag_id));
diesel::joinable!(health_logs -> users (user_id));
diesel::joinable!(health_goals -> users (user_id));
diesel::joinable!(health_appointments -> users (user_id));
diesel::joinable!(user_health_profile_history -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    tasks,
    project_chains,
    project_nodes,
    health_logs,
    health_goals,
    health_appointments,
    user_health_profile_history,
);
