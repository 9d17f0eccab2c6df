use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use super::{write_atomically, BlobStore, StorageError};

/// Filesystem-backed blob store: key `uploads/1.pdf` lives at
/// `<root>/uploads/1.pdf`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key.trim_start_matches('/'))
    }
}

#[async_trait]
impl BlobStore for LocalStorage {
    async fn put(&self, key: &str, local_path: &Path) -> super::Result<()> {
        let bytes = tokio::fs::read(local_path).await?;
        let object_path = self.object_path(key);

        if let Some(parent) = object_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        write_atomically(&object_path, &bytes).await?;

        tracing::debug!("stored {} ({} bytes)", key, bytes.len());
        Ok(())
    }

    async fn get(&self, key: &str, local_path: &Path) -> super::Result<()> {
        let bytes = match tokio::fs::read(self.object_path(key)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        write_atomically(local_path, &bytes).await
    }
}
