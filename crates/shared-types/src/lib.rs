//! Shared domain and wire types for the LifeSync backend.
//!
//! Database row structs derive `diesel::Queryable` behind the `diesel`
//! feature so non-database consumers stay free of diesel entirely.

pub mod api;
pub mod models;

pub use api::*;
pub use models::*;
