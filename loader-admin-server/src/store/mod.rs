//! Administrator credential storage.
//!
//! Records are provisioned out-of-band; this server only ever reads them.

mod memory;
mod mongo;

use async_trait::async_trait;
use mongodb::bson::Bson;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::error::Result;

pub use memory::MemoryAdminStore;
pub use mongo::{MongoAdminStore, ADMIN_COLLECTION};

/// A stored administrator credential.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AdminRecord {
    pub username: String,
    /// bcrypt hash, stored under `password`.
    #[serde(rename = "password", deserialize_with = "deserialize_password_hash")]
    pub password_hash: String,
}

impl AdminRecord {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for AdminRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminRecord")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Accepts the hash either as a BSON string or as binary holding the
/// ASCII bytes of the hash.
fn deserialize_password_hash<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::String(hash) => Ok(hash),
        Bson::Binary(binary) => String::from_utf8(binary.bytes)
            .map_err(|_| de::Error::custom("password hash is not valid UTF-8")),
        other => Err(de::Error::custom(format!(
            "unexpected password hash type: {:?}",
            other.element_type()
        ))),
    }
}

/// Read access to administrator credentials.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Look up a record by its unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>>;
}
