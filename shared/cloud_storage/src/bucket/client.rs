//! S3 bucket client implementation

use std::sync::Arc;

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use tracing::debug;

use super::{BucketResult, ObjectBackend};

/// Client for the objects of a single S3 bucket
pub struct Bucket<B = S3Client> {
    client: Arc<B>,
    name: String,
}

impl<B> Bucket<B>
where
    B: ObjectBackend,
{
    /// Creates a new bucket client
    ///
    /// # Arguments
    ///
    /// * `client` - Pre-configured S3 client
    /// * `name` - Name of the bucket
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty
    #[must_use]
    pub fn new(client: Arc<B>, name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "bucket name must not be empty");

        Self { client, name }
    }

    /// Name of the bucket
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Puts an object under `key` with the given content type, overwriting any existing object
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the upload fails
    pub async fn put(&self, key: &str, content_type: &str, body: ByteStream) -> BucketResult<()> {
        debug!("Putting object {} in bucket {}", key, self.name);

        self.client
            .upload(&self.name, key, content_type, body)
            .await
    }

    /// Gets the object under `key`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(body))` if the object exists
    /// * `Ok(None)` if there is no object under `key`
    ///
    /// # Errors
    ///
    /// Returns `BucketError` for any failure other than a missing object
    pub async fn get(&self, key: &str) -> BucketResult<Option<ByteStream>> {
        let body = self.client.download(&self.name, key).await?;

        if body.is_none() {
            debug!("Object does not exist: {}", key);
        }
        Ok(body)
    }

    /// Gets the object under `key` and reads it fully into memory
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bytes))` if the object exists
    /// * `Ok(None)` if there is no object under `key`
    ///
    /// # Errors
    ///
    /// Returns `BucketError::Body` if reading the object fails part way, other
    /// `BucketError`s as for [`Bucket::get`]
    pub async fn get_bytes(&self, key: &str) -> BucketResult<Option<Vec<u8>>> {
        let Some(body) = self.get(key).await? else {
            return Ok(None);
        };

        let data = body.collect().await?.into_bytes();
        Ok(Some(data.to_vec()))
    }

    /// Deletes the object under `key`. Deleting a missing object succeeds.
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the delete operation fails
    pub async fn delete(&self, key: &str) -> BucketResult<()> {
        debug!("Deleting object {} from bucket {}", key, self.name);

        self.client.remove(&self.name, key).await
    }
}
