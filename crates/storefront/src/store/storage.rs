//! Key-value storage backends for visitor state.
//!
//! Values are JSON documents kept as strings, so any backend that can hold
//! text by key can persist a store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_sessions::Session;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The session layer failed to read or write the record.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Durable string storage addressed by key.
pub trait Storage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Storage backed by the visitor's tower-sessions record.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    session: Session,
}

impl SessionStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl Storage for SessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.session.get::<String>(key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.session.insert(key, value).await?;
        Ok(())
    }
}

/// In-process storage.
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored value.
    pub async fn clear(&self) {
        self.values.write().await.clear();
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}
