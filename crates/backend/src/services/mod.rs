//! Business logic extracted from HTTP handlers for testability and reuse.

pub mod assistant;
pub mod hierarchy;
pub mod metrics;
pub mod prompts;
pub mod schedule;
