use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use tempfile::{NamedTempFile, TempPath};
use tokio::{fs::File, io::AsyncWriteExt};

use super::NotesError;

/// Local scratch directories bridging request bodies and the blob store.
#[derive(Clone, Debug)]
pub struct Staging {
    uploads: PathBuf,
    downloads: PathBuf,
}

impl Staging {
    pub fn new(uploads: impl Into<PathBuf>, downloads: impl Into<PathBuf>) -> Self {
        Self {
            uploads: uploads.into(),
            downloads: downloads.into(),
        }
    }

    /// Creates both directories if they do not exist yet.
    pub async fn ensure(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.uploads).await?;
        tokio::fs::create_dir_all(&self.downloads).await
    }

    pub fn uploads(&self) -> &Path {
        &self.uploads
    }

    pub fn downloads(&self) -> &Path {
        &self.downloads
    }

    pub fn upload_path(&self, note_id: i32) -> PathBuf {
        self.uploads.join(file_name(note_id))
    }

    /// Fresh, uniquely named file in the download directory. It is deleted
    /// when the returned path is dropped.
    pub fn download_target(&self) -> std::io::Result<TempPath> {
        Ok(NamedTempFile::new_in(&self.downloads)?.into_temp_path())
    }

    /// Streams a multipart file part into an anonymous file inside the
    /// upload directory. The note id is not known yet, so the file gets
    /// its final name later through [`NamedTempFile::persist`]; dropping
    /// it removes it.
    pub async fn receive(&self, field: &mut Field<'_>) -> Result<NamedTempFile, NotesError> {
        let staged = NamedTempFile::new_in(&self.uploads)?;
        let mut file = File::from_std(staged.as_file().try_clone()?);
        let mut content_length: u64 = 0;

        while let Some(chunk) = field.chunk().await.map_err(|err| {
            tracing::error!("file field chunk error: {:#?}", err);
            NotesError::from_multipart(&err, String::from("could not read 'file' part"))
        })? {
            content_length += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        tracing::debug!("received {} bytes into {:?}", content_length, staged.path());

        Ok(staged)
    }
}

/// Staged files and blobs share the same name: `<note_id>.pdf`.
pub fn file_name(note_id: i32) -> String {
    format!("{note_id}.pdf")
}

/// Blob store key of a note's PDF.
pub fn blob_key(note_id: i32) -> String {
    format!("uploads/{}", file_name(note_id))
}
