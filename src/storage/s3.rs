use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::{DisplayErrorContext, SdkError},
    operation::get_object::GetObjectError,
    primitives::ByteStream,
    Client, Config,
};

use super::{write_atomically, BlobStore, StorageError};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// S3-backed storage
#[derive(Clone)]
pub struct S3Storage {
    bucket_name: String,
    client: Client,
}

impl S3Storage {
    /// Create a new storage instance
    #[must_use]
    pub fn new(bucket_name: String, config: Config) -> Self {
        Self {
            bucket_name,
            client: Client::from_conf(config),
        }
    }
}

/// `NoSuchKey`, or a bare 404/403. Without `s3:ListBucket` S3 answers a
/// missing key with 403 AccessDenied.
fn is_missing_object(err: &SdkError<GetObjectError>) -> bool {
    if err
        .as_service_error()
        .map(GetObjectError::is_no_such_key)
        .unwrap_or(false)
    {
        return true;
    }

    err.raw_response()
        .map(|response| matches!(response.status().as_u16(), 403 | 404))
        .unwrap_or(false)
}

fn transfer_error<E: std::error::Error>(err: E) -> StorageError {
    StorageError::Transfer(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl BlobStore for S3Storage {
    async fn put(&self, key: &str, local_path: &Path) -> super::Result<()> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(transfer_error)?;

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(PDF_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(transfer_error)?;

        tracing::debug!("uploaded {} to bucket {}", key, self.bucket_name);
        Ok(())
    }

    async fn get(&self, key: &str, local_path: &Path) -> super::Result<()> {
        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) if is_missing_object(&err) => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(err) => return Err(transfer_error(err)),
        };

        let bytes = response
            .body
            .collect()
            .await
            .map_err(transfer_error)?
            .into_bytes();

        write_atomically(local_path, &bytes).await
    }
}
