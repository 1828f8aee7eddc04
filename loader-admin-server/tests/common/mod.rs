// Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use loader_admin_server::auth::hash_password;
use loader_admin_server::config::{JwtSecret, ServerConfig};
use loader_admin_server::http::{create_router, AppState};
use loader_admin_server::store::{AdminRecord, AdminStore, MemoryAdminStore};
use loader_admin_server::{Result, ServerError};

pub const SECRET: &str = "integration-test-secret";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cure-pa55";
pub const ADMIN_PAGE: &str = "<html><body>Loader Admin</body></html>";
pub const STATIC_SCRIPT: &str = "console.log('admin');";

/// Store whose lookups always fail, standing in for an unreachable database.
pub struct FailingAdminStore;

#[async_trait]
impl AdminStore for FailingAdminStore {
    async fn find_by_username(&self, _username: &str) -> Result<Option<AdminRecord>> {
        Err(ServerError::database("server selection timeout: no available servers"))
    }
}

/// A router over a test store and a temporary asset directory.
///
/// The directory is removed when the fixture is dropped.
pub struct TestApp {
    pub router: Router,
    _assets: TempDir,
}

impl TestApp {
    /// In-memory store holding the admin account, with all assets present.
    pub fn new() -> Self {
        Self::build(Arc::new(admin_store()), true)
    }

    /// All assets present, lookups served by `store`.
    pub fn with_store(store: Arc<dyn AdminStore>) -> Self {
        Self::build(store, true)
    }

    /// Static directory present but no admin page on disk.
    pub fn without_admin_page() -> Self {
        Self::build(Arc::new(admin_store()), false)
    }

    fn build(store: Arc<dyn AdminStore>, write_admin_page: bool) -> Self {
        let assets = tempfile::tempdir().expect("Failed to create asset directory");
        let static_dir = assets.path().join("static");
        std::fs::create_dir(&static_dir).expect("Failed to create static directory");
        std::fs::write(static_dir.join("admin.js"), STATIC_SCRIPT)
            .expect("Failed to write script");
        let admin_page = assets.path().join("admin.html");
        if write_admin_page {
            std::fs::write(&admin_page, ADMIN_PAGE).expect("Failed to write admin page");
        }

        let config = ServerConfig {
            jwt_secret: JwtSecret::new(SECRET),
            admin_page,
            static_dir,
            ..ServerConfig::default()
        };

        let state = AppState::new(Arc::new(config), store);
        Self {
            router: create_router(state),
            _assets: assets,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn login(&self, body: &str) -> Response<Body> {
        self.send(
            Request::post("/api/login")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

fn admin_store() -> MemoryAdminStore {
    MemoryAdminStore::new().with_record(AdminRecord::new(
        ADMIN_USER,
        hash_password(ADMIN_PASSWORD, 4).expect("Failed to hash password"),
    ))
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}
