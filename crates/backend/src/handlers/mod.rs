//! HTTP handlers, grouped by resource.

pub mod chains;
pub mod chat;
pub mod health;
pub mod profile;
pub mod tags;
pub mod tasks;
