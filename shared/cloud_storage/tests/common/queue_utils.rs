//! Queue test setup utilities

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_sqs::Client as SqsClient;
use cloud_storage::{Queue, QueueConfig};
use uuid::Uuid;

use super::{setup_test_env, test_sdk_config, test_settings};

/// Test context that provides an SQS client and a fresh queue.
///
/// Call [`QueueTestContext::cleanup`] at the end of the test to remove the queue.
pub struct QueueTestContext {
    pub sqs_client: Arc<SqsClient>,
    pub queue_name: String,
    pub queue_url: String,
}

impl QueueTestContext {
    /// Creates a new test context with a uniquely named standard queue
    pub async fn new(test_name: &str) -> Self {
        setup_test_env();

        let queue_name = format!("{}-{}", test_name, Uuid::new_v4());
        let settings = test_settings();
        let sqs_client = Arc::new(settings.sqs_client(&test_sdk_config(&settings).await));

        let result = sqs_client
            .create_queue()
            .queue_name(&queue_name)
            .send()
            .await
            .expect("Failed to create test queue");

        let queue_url = result
            .queue_url()
            .expect("Queue URL not returned")
            .to_string();

        Self {
            sqs_client,
            queue_name,
            queue_url,
        }
    }

    /// Queue façade over the test queue
    pub fn queue(&self, wait_time: Duration) -> Queue {
        Queue::new(
            self.sqs_client.clone(),
            QueueConfig::new(self.queue_name.clone()).with_wait_time(wait_time),
        )
    }

    /// Deletes the test queue
    pub async fn cleanup(self) {
        self.sqs_client
            .delete_queue()
            .queue_url(&self.queue_url)
            .send()
            .await
            .expect("Failed to delete test queue");
    }
}
