//! MongoDB-backed credential store.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use super::{AdminRecord, AdminStore};
use crate::error::{Result, ServerError};

/// Collection holding administrator credentials.
pub const ADMIN_COLLECTION: &str = "admin";

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Credential store reading the `admin` collection.
#[derive(Clone)]
pub struct MongoAdminStore {
    admins: Collection<AdminRecord>,
}

impl MongoAdminStore {
    /// Connect to `uri` and verify the server is reachable.
    ///
    /// Fails if no server answers a `ping` within the selection timeout.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.app_name = Some(String::from("loader-admin-server"));

        let client = Client::with_options(options)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB database {}", database);

        Ok(Self {
            admins: db.collection(ADMIN_COLLECTION),
        })
    }
}

#[async_trait]
impl AdminStore for MongoAdminStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>> {
        debug!("Looking up admin record for {}", username);
        self.admins
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| ServerError::database(format!("Admin lookup failed: {}", e)))
    }
}
