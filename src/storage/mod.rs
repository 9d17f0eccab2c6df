use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use tempfile::NamedTempFile;

pub mod helpers;
pub mod local;
pub mod s3;

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

/// Blob store handle shared by every handler.
pub type SharedStorage = Arc<dyn BlobStore>;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("object {0} not found")]
    NotFound(String),

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Object storage keyed by string paths. Transfers go through local files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads the file at `local_path` under `key`.
    async fn put(&self, key: &str, local_path: &Path) -> Result<()>;

    /// Downloads `key` into `local_path`. Returns [`StorageError::NotFound`]
    /// and leaves `local_path` untouched when the key does not exist.
    async fn get(&self, key: &str, local_path: &Path) -> Result<()>;
}

/// Writes `bytes` to a uniquely named sibling of `path` and renames it into
/// place. Concurrent writers to the same `path` never share a file, and a
/// reader sees either the old file or a complete new one.
pub(crate) async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // removed on drop unless persisted
    let partial = NamedTempFile::new_in(dir)?.into_temp_path();

    tokio::fs::write(&partial, bytes).await?;
    partial.persist(path).map_err(|err| err.error)?;

    Ok(())
}
