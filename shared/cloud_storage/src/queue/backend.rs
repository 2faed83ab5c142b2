//! Client seam between [`Queue`](super::Queue) and SQS
//!
//! [`QueueBackend`] is implemented for the SQS client. Everything above it
//! talks in queue URLs and raw string bodies.

use async_trait::async_trait;
use aws_sdk_sqs::{operation::get_queue_url::GetQueueUrlError, Client as SqsClient};

use crate::queue::{
    error::{QueueError, QueueResult},
    types::ReceivedMessage,
};

/// Operations a queue needs from the messaging service
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Looks up the URL of the queue with the given name
    async fn resolve_queue_url(&self, queue_name: &str) -> QueueResult<String>;

    /// Sends a raw message body
    async fn send_body(&self, queue_url: &str, body: String) -> QueueResult<()>;

    /// Receives at most one message, waiting up to `wait_time_seconds` for one to arrive
    async fn receive_one(
        &self,
        queue_url: &str,
        wait_time_seconds: i32,
    ) -> QueueResult<Option<ReceivedMessage>>;

    /// Deletes the delivery identified by `receipt_handle`
    async fn delete_delivery(&self, queue_url: &str, receipt_handle: &str) -> QueueResult<()>;

    /// Sets the visibility timeout of a delivery, counted from now
    async fn change_visibility(
        &self,
        queue_url: &str,
        receipt_handle: &str,
        visibility_timeout_seconds: i32,
    ) -> QueueResult<()>;
}

#[async_trait]
impl QueueBackend for SqsClient {
    async fn resolve_queue_url(&self, queue_name: &str) -> QueueResult<String> {
        let output = self
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .is_some_and(GetQueueUrlError::is_queue_does_not_exist)
                {
                    QueueError::QueueNotFound(queue_name.to_string())
                } else {
                    QueueError::from(e)
                }
            })?;

        output
            .queue_url()
            .map(ToString::to_string)
            .ok_or_else(|| QueueError::MissingQueueUrl(queue_name.to_string()))
    }

    async fn send_body(&self, queue_url: &str, body: String) -> QueueResult<()> {
        self.send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await?;

        Ok(())
    }

    async fn receive_one(
        &self,
        queue_url: &str,
        wait_time_seconds: i32,
    ) -> QueueResult<Option<ReceivedMessage>> {
        let output = self
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(wait_time_seconds)
            .send()
            .await?;

        let Some(message) = output.messages().first() else {
            return Ok(None);
        };

        let body = message
            .body()
            .ok_or_else(|| QueueError::InvalidMessage("message has no body".to_string()))?;
        let receipt_handle = message.receipt_handle().ok_or_else(|| {
            QueueError::InvalidMessage("message has no receipt handle".to_string())
        })?;

        Ok(Some(ReceivedMessage {
            body: body.to_string(),
            receipt_handle: receipt_handle.to_string(),
        }))
    }

    async fn delete_delivery(&self, queue_url: &str, receipt_handle: &str) -> QueueResult<()> {
        self.delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }

    async fn change_visibility(
        &self,
        queue_url: &str,
        receipt_handle: &str,
        visibility_timeout_seconds: i32,
    ) -> QueueResult<()> {
        self.change_message_visibility()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .visibility_timeout(visibility_timeout_seconds)
            .send()
            .await?;

        Ok(())
    }
}
