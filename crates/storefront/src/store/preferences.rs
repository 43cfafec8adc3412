//! Visitor display preferences.

use crate::models::session_keys;

use super::storage::{Storage, StorageError};

/// Whether the visitor has dark mode switched on.
///
/// Anything other than a stored `"true"` reads as off.
pub async fn dark_mode<S: Storage>(storage: &S) -> bool {
    match storage.get(session_keys::DARK_MODE).await {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read dark mode preference");
            false
        }
    }
}

/// Flip the dark mode preference and persist it.
///
/// Returns the new setting.
///
/// # Errors
///
/// Returns an error if the storage backend fails to write.
pub async fn toggle_dark_mode<S: Storage>(storage: &S) -> Result<bool, StorageError> {
    let enabled = !dark_mode(storage).await;
    storage
        .set(session_keys::DARK_MODE, enabled.to_string())
        .await?;
    Ok(enabled)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[tokio::test]
    async fn test_toggle_persists() {
        let storage = MemoryStorage::new();
        assert!(!dark_mode(&storage).await);

        assert!(toggle_dark_mode(&storage).await.unwrap());
        assert_eq!(
            storage.get(session_keys::DARK_MODE).await.unwrap().as_deref(),
            Some("true")
        );
        assert!(dark_mode(&storage).await);

        assert!(!toggle_dark_mode(&storage).await.unwrap());
        assert!(!dark_mode(&storage).await);
    }

    #[tokio::test]
    async fn test_unexpected_value_reads_as_off() {
        let storage = MemoryStorage::new();
        storage
            .set(session_keys::DARK_MODE, "yes".to_string())
            .await
            .unwrap();
        assert!(!dark_mode(&storage).await);
    }
}
