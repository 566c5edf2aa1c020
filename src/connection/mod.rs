//! Connection management for MongoDB.
//!
//! This module provides a thin wrapper around the driver's `Client`:
//! - URI parsing into `ClientOptions` with timeouts from configuration
//! - Connection verification with a `ping` command
//! - Database handle resolution
//!
//! There is no retry logic or pool tuning here; the tool runs one
//! operation per process and relies on driver defaults.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, Result};

/// MongoDB connection manager.
pub struct ConnectionManager {
    /// MongoDB client instance, present after a successful connect.
    client: Option<Client>,

    /// Connection configuration.
    config: ConnectionConfig,

    /// Connection URI.
    uri: String,
}

impl ConnectionManager {
    /// Create a new connection manager.
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection URI
    /// * `config` - Connection configuration
    pub fn new(uri: String, config: ConnectionConfig) -> Self {
        Self {
            client: None,
            config,
            uri,
        }
    }

    /// Establish and verify a connection to MongoDB.
    ///
    /// Parses the URI, applies the configured timeouts, then pings the
    /// server so that a bad address fails here rather than on the first
    /// operation.
    pub async fn connect(&mut self) -> Result<()> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(e.to_string()))?;

        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(std::time::Duration::from_secs(self.config.timeout));
        options.server_selection_timeout =
            Some(std::time::Duration::from_secs(self.config.timeout));

        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::ConnectionFailed(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::PingFailed(e.to_string()))?;

        debug!("Connected to {}", self.uri);
        self.client = Some(client);
        Ok(())
    }

    /// Get a database handle.
    ///
    /// # Arguments
    /// * `name` - Database name
    pub fn database(&self, name: &str) -> Result<Database> {
        match &self.client {
            Some(client) => Ok(client.database(name)),
            None => Err(ConnectionError::NotConnected.into()),
        }
    }

    /// Check if currently connected.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionConfig;
    use crate::error::MongoqError;

    #[test]
    fn test_new_manager_is_disconnected() {
        let manager = ConnectionManager::new(
            "mongodb://localhost:27017".to_string(),
            ConnectionConfig::default(),
        );
        assert!(!manager.is_connected());
    }

    #[test]
    fn test_database_before_connect_fails() {
        let manager = ConnectionManager::new(
            "mongodb://localhost:27017".to_string(),
            ConnectionConfig::default(),
        );
        let err = manager.database("test").unwrap_err();
        assert!(matches!(
            err,
            MongoqError::Connection(ConnectionError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_scheme() {
        let mut manager =
            ConnectionManager::new("http://localhost".to_string(), ConnectionConfig::default());
        let err = manager.connect().await.unwrap_err();
        assert!(matches!(
            err,
            MongoqError::Connection(ConnectionError::InvalidUri(_))
        ));
    }
}
