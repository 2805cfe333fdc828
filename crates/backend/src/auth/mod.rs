//! Authentication module for JWT-based auth with password login.
//!
//! This module provides:
//! - JWT token creation and validation
//! - Password registration and login with bcrypt hashes
//! - `require_auth` middleware for protecting routes

mod handlers;
mod jwt;
mod middleware;
pub mod types;

pub use handlers::{login, logout, me, register};
pub use middleware::{build_auth_cookie, require_auth};
