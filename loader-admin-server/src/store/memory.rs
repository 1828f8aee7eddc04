//! In-process credential store.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{AdminRecord, AdminStore};
use crate::error::Result;

/// Credential store backed by a map, for tests and local runs without a
/// database.
#[derive(Debug, Default, Clone)]
pub struct MemoryAdminStore {
    records: HashMap<String, AdminRecord>,
}

impl MemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any existing record with the same username.
    pub fn with_record(mut self, record: AdminRecord) -> Self {
        self.records.insert(record.username.clone(), record);
        self
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>> {
        Ok(self.records.get(username).cloned())
    }
}
