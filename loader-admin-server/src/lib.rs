//! Loader Admin API
//!
//! Admin authentication server: a login endpoint backed by MongoDB, a
//! health check, and the admin page with its static assets.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
