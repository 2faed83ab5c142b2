//! Bucket test setup utilities

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use cloud_storage::Bucket;
use uuid::Uuid;

use super::{setup_test_env, test_sdk_config, test_settings};

/// Test context that provides an S3 client and a fresh bucket.
///
/// Call [`BucketTestContext::cleanup`] at the end of the test to remove the bucket.
pub struct BucketTestContext {
    pub s3_client: Arc<S3Client>,
    pub bucket_name: String,
}

impl BucketTestContext {
    /// Creates a new test context with a uniquely named, empty bucket
    pub async fn new(test_name: &str) -> Self {
        setup_test_env();

        let bucket_name = format!("{}-{}", test_name, Uuid::new_v4());
        let settings = test_settings();
        let s3_client = Arc::new(settings.s3_client(&test_sdk_config(&settings).await));

        // Leftovers from an aborted run must not leak into this one
        cleanup_bucket(&s3_client, &bucket_name).await;

        s3_client
            .create_bucket()
            .bucket(&bucket_name)
            .send()
            .await
            .expect("Failed to create test bucket");

        Self {
            s3_client,
            bucket_name,
        }
    }

    /// Bucket façade over the test bucket
    pub fn bucket(&self) -> Bucket {
        Bucket::new(self.s3_client.clone(), self.bucket_name.clone())
    }

    /// Deletes the test bucket and everything in it
    pub async fn cleanup(self) {
        cleanup_bucket(&self.s3_client, &self.bucket_name).await;
    }
}

/// Deletes every object in the bucket, then the bucket itself
pub async fn cleanup_bucket(client: &S3Client, bucket_name: &str) {
    let Ok(objects) = client.list_objects_v2().bucket(bucket_name).send().await else {
        // Bucket does not exist
        return;
    };

    for object in objects.contents() {
        if let Some(key) = object.key() {
            client
                .delete_object()
                .bucket(bucket_name)
                .key(key)
                .send()
                .await
                .expect("Failed to delete test object");
        }
    }

    client
        .delete_bucket()
        .bucket(bucket_name)
        .send()
        .await
        .expect("Failed to delete test bucket");
}
