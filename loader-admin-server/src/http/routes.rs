//! HTTP route definitions.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

use super::extract::AdminClaims;
use super::middleware::{create_cors_layer, create_trace_layer};
use crate::auth::{self, Credentials, TokenIssuer};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::store::AdminStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn AdminStore>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>, store: Arc<dyn AdminStore>) -> Self {
        let tokens = Arc::new(TokenIssuer::new(&config.jwt_secret));
        Self {
            config,
            store,
            tokens,
        }
    }
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Successful login response.
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Current session response.
#[derive(Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub exp: i64,
}

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let admin_page = ServeFile::new(&state.config.admin_page);
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route_service("/", admin_page)
        .route("/health", get(health))
        .route("/api/login", post(login))
        .route("/api/session", get(session))
        .nest_service("/static", static_files)
        .layer(create_cors_layer())
        .layer(create_trace_layer())
        .with_state(state)
}

/// Health check endpoint. Does not consult the database.
async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

/// Exchange a username and password for a bearer token.
async fn login(State(state): State<AppState>, body: Bytes) -> Result<Json<TokenResponse>> {
    let credentials = Credentials::from_json_body(&body)?;
    let token = auth::authenticate(state.store.as_ref(), &state.tokens, credentials).await?;
    Ok(Json(TokenResponse { token }))
}

/// Report the identity behind a bearer token.
async fn session(AdminClaims(claims): AdminClaims) -> Json<SessionResponse> {
    Json(SessionResponse {
        username: claims.username,
        exp: claims.exp,
    })
}
