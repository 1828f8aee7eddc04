//! HTTP server module.
//!
//! Provides the login API, the health check, and the admin page with its
//! static assets.

mod extract;
mod middleware;
pub mod routes;

pub use extract::AdminClaims;
pub use middleware::{create_cors_layer, create_trace_layer};
pub use routes::{create_router, AppState};
