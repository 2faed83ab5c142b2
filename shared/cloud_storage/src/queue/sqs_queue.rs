//! JSON message queue backed by SQS

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_sqs::Client as SqsClient;
use chrono::TimeDelta;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::queue::{
    backend::QueueBackend,
    error::{QueueError, QueueResult},
    types::{Body, Message, QueueConfig},
};

/// Longest long-polling wait SQS accepts
const MAX_WAIT_TIME: Duration = Duration::from_secs(20);
/// Longest visibility timeout SQS accepts
const MAX_VISIBILITY_TIMEOUT_HOURS: i64 = 12;

/// Queue of JSON messages
///
/// The queue URL is resolved lazily on the first operation and cached. Once
/// resolved, operations read it without locking.
pub struct Queue<B = SqsClient> {
    client: Arc<B>,
    name: String,
    url: OnceCell<String>,
    wait_time: Duration,
}

impl<B> Queue<B>
where
    B: QueueBackend,
{
    /// Creates a new queue
    ///
    /// # Arguments
    ///
    /// * `client` - Pre-configured SQS client
    /// * `config` - Queue name and long polling wait time
    ///
    /// # Panics
    ///
    /// Panics if the queue name is empty or the wait time is above 20 seconds
    #[must_use]
    pub fn new(client: Arc<B>, config: QueueConfig) -> Self {
        assert!(
            !config.queue_name.is_empty(),
            "queue name must not be empty"
        );
        assert!(
            config.wait_time <= MAX_WAIT_TIME,
            "queue wait time must be between 0 and 20 seconds, both inclusive"
        );

        Self {
            client,
            name: config.queue_name,
            url: OnceCell::new(),
            wait_time: config.wait_time,
        }
    }

    /// Name of the queue
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The queue URL, if it has been resolved already
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.get().map(String::as_str)
    }

    /// Sends a message body as JSON
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the queue URL cannot be resolved, the body cannot be
    /// serialized or the send operation fails
    pub async fn send(&self, body: &Body) -> QueueResult<()> {
        let url = self.ensure_url().await?;

        let message_body = serde_json::to_string(body).map_err(QueueError::Serialization)?;
        self.client.send_body(url, message_body).await?;

        debug!("Sent message to queue {}", self.name);
        Ok(())
    }

    /// Receives a single message, waiting up to the configured wait time for one to arrive
    ///
    /// # Returns
    ///
    /// * `Ok(Some(message))` if a message was received
    /// * `Ok(None)` if no message arrived in time or `cancel` was triggered while waiting
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the queue URL cannot be resolved, the receive operation
    /// fails or the message body is not a JSON object
    pub async fn receive(&self, cancel: &CancellationToken) -> QueueResult<Option<Message>> {
        let url = self.ensure_url().await?;

        let received = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Receive on queue {} cancelled", self.name);
                return Ok(None);
            }
            result = self.client.receive_one(url, self.wait_time_seconds()) => result?,
        };

        let Some(received) = received else {
            debug!("No message available on queue {}", self.name);
            return Ok(None);
        };

        let body: Body =
            serde_json::from_str(&received.body).map_err(QueueError::Deserialization)?;

        Ok(Some(Message {
            body,
            receipt_handle: received.receipt_handle,
        }))
    }

    /// Deletes a received message
    ///
    /// Does nothing if `receipt_handle` is empty.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the queue URL cannot be resolved or the delete operation fails
    pub async fn delete(&self, receipt_handle: &str) -> QueueResult<()> {
        let url = self.ensure_url().await?;

        if receipt_handle.is_empty() {
            return Ok(());
        }

        self.client.delete_delivery(url, receipt_handle).await
    }

    /// Sets the visibility timeout of a received message, overwriting any existing timeout.
    /// The timeout counts from now.
    ///
    /// Does nothing if `receipt_handle` is empty.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::InvalidVisibilityTimeout` if `timeout` is negative or above
    /// 12 hours, without calling SQS. Returns other `QueueError`s if the queue URL cannot be
    /// resolved or the operation fails.
    pub async fn set_visibility_timeout(
        &self,
        receipt_handle: &str,
        timeout: TimeDelta,
    ) -> QueueResult<()> {
        if timeout < TimeDelta::zero() || timeout > TimeDelta::hours(MAX_VISIBILITY_TIMEOUT_HOURS)
        {
            return Err(QueueError::InvalidVisibilityTimeout);
        }
        let seconds = i32::try_from(timeout.num_seconds())
            .map_err(|_| QueueError::InvalidVisibilityTimeout)?;

        let url = self.ensure_url().await?;

        if receipt_handle.is_empty() {
            return Ok(());
        }

        self.client
            .change_visibility(url, receipt_handle, seconds)
            .await?;

        debug!(
            "Set visibility timeout of message on queue {} to {}s",
            self.name, seconds
        );
        Ok(())
    }

    /// Returns the queue URL, resolving it first if needed.
    ///
    /// Double-checked: a set cell is read without locking, otherwise the caller
    /// waits on the cell's lock and re-checks before resolving. A failed
    /// resolution leaves the cell unset so the next call retries.
    async fn ensure_url(&self) -> QueueResult<&str> {
        self.url
            .get_or_try_init(|| self.resolve_url())
            .await
            .map(String::as_str)
    }

    async fn resolve_url(&self) -> QueueResult<String> {
        debug!("Resolving URL for queue {}", self.name);

        let url = self.client.resolve_queue_url(&self.name).await?;

        info!("Resolved URL for queue {}: {}", self.name, url);
        Ok(url)
    }

    fn wait_time_seconds(&self) -> i32 {
        i32::try_from(self.wait_time.as_secs()).unwrap_or(i32::MAX)
    }
}
