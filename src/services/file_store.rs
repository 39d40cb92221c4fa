// src/services/file_store.rs
// DOCUMENTATION: Photo byte storage
// PURPOSE: Persist uploaded photo bytes and hand back the URL stored on the photo row

use crate::errors::WishlistError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store bytes and return the public URL for them
    async fn save(&self, bytes: &[u8], suggested_name: &str) -> Result<String, WishlistError>;

    async fn read(&self, url: &str) -> Result<Vec<u8>, WishlistError>;

    /// Missing files are not an error
    async fn delete(&self, url: &str) -> Result<(), WishlistError>;
}

/// Files on local disk under `root`, exposed as `<public_prefix>/<name>`
pub struct LocalFileStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Map a stored URL back to a path inside `root`
    /// DOCUMENTATION: Only plain file names directly under the prefix resolve
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let name = url
            .strip_prefix(&self.public_prefix)?
            .strip_prefix('/')?;

        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(|c: char| c == '/' || c == '\\');

        valid.then(|| self.root.join(name))
    }
}

/// Unique stored name that keeps a short alphanumeric extension
pub fn stored_file_name(suggested_name: &str) -> String {
    let extension = Path::new(suggested_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, bytes: &[u8], suggested_name: &str) -> Result<String, WishlistError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            log::error!("Failed to create upload dir {}: {}", self.root.display(), e);
            WishlistError::StorageError(e.to_string())
        })?;

        let name = stored_file_name(suggested_name);
        let path = self.root.join(&name);

        tokio::fs::write(&path, bytes).await.map_err(|e| {
            log::error!("Failed to write {}: {}", path.display(), e);
            WishlistError::StorageError(e.to_string())
        })?;

        log::debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(format!("{}/{}", self.public_prefix, name))
    }

    async fn read(&self, url: &str) -> Result<Vec<u8>, WishlistError> {
        let path = self
            .resolve(url)
            .ok_or_else(|| WishlistError::NotFound(format!("File {} not found", url)))?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(WishlistError::NotFound(format!("File {} not found", url)))
            }
            Err(e) => {
                log::error!("Failed to read {}: {}", path.display(), e);
                Err(WishlistError::StorageError(e.to_string()))
            }
        }
    }

    async fn delete(&self, url: &str) -> Result<(), WishlistError> {
        let Some(path) = self.resolve(url) else {
            log::debug!("Ignoring delete for foreign file URL {}", url);
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                log::error!("Failed to delete {}: {}", path.display(), e);
                Err(WishlistError::StorageError(e.to_string()))
            }
        }
    }
}
