//! In-memory object backend

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use super::{BucketError, BucketResult, ObjectBackend};

/// A stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Content type given on put
    pub content_type: String,
    /// Object bytes
    pub data: Vec<u8>,
}

/// In-memory stand-in for the S3 client
#[derive(Default)]
pub struct MockObjectBackend {
    buckets: Mutex<HashMap<String, HashMap<String, StoredObject>>>,
}

impl MockObjectBackend {
    /// Creates a backend without any buckets
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bucket
    pub fn create_bucket(&self, bucket: &str) {
        self.lock().entry(bucket.to_string()).or_default();
    }

    /// Returns the stored object under `key`, if any
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, HashMap<String, StoredObject>>> {
        self.buckets
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn with_bucket<T>(
        &self,
        bucket: &str,
        f: impl FnOnce(&mut HashMap<String, StoredObject>) -> T,
    ) -> BucketResult<T> {
        let mut buckets = self.lock();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| BucketError::BucketNotFound(bucket.to_string()))?;
        Ok(f(objects))
    }
}

#[async_trait]
impl ObjectBackend for MockObjectBackend {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> BucketResult<()> {
        let data = body.collect().await?.into_bytes().to_vec();

        self.with_bucket(bucket, |objects| {
            objects.insert(
                key.to_string(),
                StoredObject {
                    content_type: content_type.to_string(),
                    data,
                },
            );
        })
    }

    async fn download(&self, bucket: &str, key: &str) -> BucketResult<Option<ByteStream>> {
        self.with_bucket(bucket, |objects| {
            objects
                .get(key)
                .map(|object| ByteStream::from(object.data.clone()))
        })
    }

    async fn remove(&self, bucket: &str, key: &str) -> BucketResult<()> {
        self.with_bucket(bucket, |objects| {
            objects.remove(key);
        })
    }
}
