use std::sync::Arc;
use std::time::Duration;

use mongodb::options::ClientOptions;

use crate::dbs::mongo::MongoChatStore;
use crate::error::{PersistError, Result};
use crate::registry::ChatRegistry;

/// Connects to MongoDB and yields a [`ChatRegistry`] over the `chats` collection
pub struct ChatRegistryBuilder {
    mongodb_uri: Option<String>,
    database: Option<String>,
    max_pool_size: Option<u32>,
    server_selection_timeout: Option<Duration>,
    create_indexes: bool,
}

impl ChatRegistryBuilder {
    pub fn new() -> Self {
        Self {
            mongodb_uri: None,
            database: None,
            max_pool_size: None,
            server_selection_timeout: None,
            create_indexes: true,
        }
    }

    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }

    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }

    pub fn max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = Some(size);
        self
    }

    pub fn server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = Some(timeout);
        self
    }

    /// Skip index creation at startup (e.g. read-only credentials)
    pub fn create_indexes(mut self, enabled: bool) -> Self {
        self.create_indexes = enabled;
        self
    }

    pub async fn build(self) -> Result<ChatRegistry> {
        let mongodb_uri = self
            .mongodb_uri
            .ok_or_else(|| PersistError::Internal("mongodb_uri is required".to_string()))?;
        let database = self
            .database
            .ok_or_else(|| PersistError::Internal("database is required".to_string()))?;

        let mut options = ClientOptions::parse(&mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        if let Some(size) = self.max_pool_size {
            options.max_pool_size = Some(size);
        }
        if let Some(timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
        }

        let store = MongoChatStore::connect_with_options(options, &database)?;
        if self.create_indexes {
            store
                .create_indexes()
                .await
                .map_err(|e| PersistError::Connection(e.to_string()))?;
        }

        tracing::info!(database = %database, "Chat registry connected to MongoDB");
        Ok(ChatRegistry::new(Arc::new(store)))
    }
}

impl Default for ChatRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_requires_uri_and_database() {
        let err = ChatRegistryBuilder::new()
            .database("bazaar")
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PersistError::Internal(msg) if msg.contains("mongodb_uri")));

        let err = ChatRegistryBuilder::new()
            .mongodb_uri("mongodb://localhost:27017")
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PersistError::Internal(msg) if msg.contains("database")));
    }

    #[tokio::test]
    async fn test_build_rejects_malformed_uri() {
        let err = ChatRegistryBuilder::new()
            .mongodb_uri("not a uri")
            .database("bazaar")
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PersistError::Connection(_)));
    }

    #[tokio::test]
    async fn test_build_reports_unreachable_server_as_connection_error() {
        let err = ChatRegistryBuilder::new()
            .mongodb_uri("mongodb://127.0.0.1:1/?directConnection=true")
            .database("bazaar")
            .server_selection_timeout(Duration::from_millis(100))
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PersistError::Connection(_)));
    }
}
