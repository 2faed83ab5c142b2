use async_trait::async_trait;
use aws_sdk_s3::{
    error::{ProvideErrorMetadata, SdkError},
    operation::get_object::GetObjectError,
    primitives::ByteStream,
    Client as S3Client,
};

use super::{BucketError, BucketResult};

/// Operations a bucket needs from the object storage service
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// Stores `body` under `key`, replacing any existing object
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> BucketResult<()>;

    /// Fetches the object under `key`, `None` if there is none
    async fn download(&self, bucket: &str, key: &str) -> BucketResult<Option<ByteStream>>;

    /// Removes the object under `key`, succeeding if there is none
    async fn remove(&self, bucket: &str, key: &str) -> BucketResult<()>;
}

#[async_trait]
impl ObjectBackend for S3Client {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> BucketResult<()> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| map_sdk_error(bucket, e))?;

        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> BucketResult<Option<ByteStream>> {
        match self.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => Ok(Some(output.body)),
            Err(e) if e.as_service_error().is_some_and(GetObjectError::is_no_such_key) => Ok(None),
            Err(e) => Err(map_sdk_error(bucket, e)),
        }
    }

    async fn remove(&self, bucket: &str, key: &str) -> BucketResult<()> {
        self.delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(bucket, e))?;

        Ok(())
    }
}

/// Maps a missing bucket to `BucketNotFound`, everything else to the operation's error
fn map_sdk_error<E>(bucket: &str, error: SdkError<E>) -> BucketError
where
    E: ProvideErrorMetadata,
    BucketError: From<SdkError<E>>,
{
    if error.as_service_error().and_then(ProvideErrorMetadata::code) == Some("NoSuchBucket") {
        return BucketError::BucketNotFound(bucket.to_string());
    }
    BucketError::from(error)
}
