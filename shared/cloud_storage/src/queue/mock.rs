//! In-memory queue backend
//!
//! Mimics the SQS behaviour the queue relies on: URL lookup by name, long
//! polling, visibility timeouts and a fresh receipt handle per delivery.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use uuid::Uuid;

use crate::queue::{
    backend::QueueBackend,
    error::{QueueError, QueueResult},
    types::ReceivedMessage,
};

/// Visibility timeout applied to a message when it is received
pub const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

struct StoredMessage {
    body: String,
    receipt_handle: Option<String>,
    visible_at: Instant,
}

struct MockQueue {
    url: String,
    messages: Vec<StoredMessage>,
}

/// In-memory stand-in for the SQS client
#[derive(Default)]
pub struct MockQueueBackend {
    queues: Mutex<HashMap<String, MockQueue>>,
    resolve_calls: AtomicUsize,
    resolve_delay: Duration,
}

impl MockQueueBackend {
    /// Creates a backend without any queues
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every URL lookup, widening the window for concurrent first use
    #[must_use]
    pub fn with_resolve_delay(mut self, resolve_delay: Duration) -> Self {
        self.resolve_delay = resolve_delay;
        self
    }

    /// Creates a queue and returns its URL
    pub fn create_queue(&self, queue_name: &str) -> String {
        let url = format!("http://localhost:4566/000000000000/{queue_name}");
        self.lock()
            .entry(queue_name.to_string())
            .or_insert_with(|| MockQueue {
                url: url.clone(),
                messages: Vec::new(),
            });
        url
    }

    /// Deletes a queue and all its messages
    pub fn delete_queue(&self, queue_name: &str) {
        self.lock().remove(queue_name);
    }

    /// Number of URL lookups issued so far
    #[must_use]
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Number of messages stored in a queue, visible or not
    #[must_use]
    pub fn message_count(&self, queue_name: &str) -> usize {
        self.lock()
            .get(queue_name)
            .map_or(0, |queue| queue.messages.len())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, MockQueue>> {
        self.queues
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn with_queue<T>(
        &self,
        queue_url: &str,
        f: impl FnOnce(&mut MockQueue) -> QueueResult<T>,
    ) -> QueueResult<T> {
        let mut queues = self.lock();
        let queue = queues
            .values_mut()
            .find(|queue| queue.url == queue_url)
            .ok_or_else(|| QueueError::QueueNotFound(queue_url.to_string()))?;
        f(queue)
    }

    fn take_visible(&self, queue_url: &str) -> QueueResult<Option<ReceivedMessage>> {
        self.with_queue(queue_url, |queue| {
            let now = Instant::now();
            let Some(message) = queue
                .messages
                .iter_mut()
                .find(|message| message.visible_at <= now)
            else {
                return Ok(None);
            };

            let receipt_handle = Uuid::new_v4().to_string();
            message.receipt_handle = Some(receipt_handle.clone());
            message.visible_at = now + DEFAULT_VISIBILITY_TIMEOUT;

            Ok(Some(ReceivedMessage {
                body: message.body.clone(),
                receipt_handle,
            }))
        })
    }
}

#[async_trait]
impl QueueBackend for MockQueueBackend {
    async fn resolve_queue_url(&self, queue_name: &str) -> QueueResult<String> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if !self.resolve_delay.is_zero() {
            tokio::time::sleep(self.resolve_delay).await;
        }

        self.lock()
            .get(queue_name)
            .map(|queue| queue.url.clone())
            .ok_or_else(|| QueueError::QueueNotFound(queue_name.to_string()))
    }

    async fn send_body(&self, queue_url: &str, body: String) -> QueueResult<()> {
        self.with_queue(queue_url, |queue| {
            queue.messages.push(StoredMessage {
                body,
                receipt_handle: None,
                visible_at: Instant::now(),
            });
            Ok(())
        })
    }

    async fn receive_one(
        &self,
        queue_url: &str,
        wait_time_seconds: i32,
    ) -> QueueResult<Option<ReceivedMessage>> {
        let wait_time = Duration::from_secs(u64::try_from(wait_time_seconds).unwrap_or(0));
        let deadline = Instant::now() + wait_time;

        loop {
            if let Some(message) = self.take_visible(queue_url)? {
                return Ok(Some(message));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn delete_delivery(&self, queue_url: &str, receipt_handle: &str) -> QueueResult<()> {
        self.with_queue(queue_url, |queue| {
            queue
                .messages
                .retain(|message| message.receipt_handle.as_deref() != Some(receipt_handle));
            Ok(())
        })
    }

    async fn change_visibility(
        &self,
        queue_url: &str,
        receipt_handle: &str,
        visibility_timeout_seconds: i32,
    ) -> QueueResult<()> {
        let timeout = Duration::from_secs(u64::try_from(visibility_timeout_seconds).unwrap_or(0));

        self.with_queue(queue_url, |queue| {
            let message = queue
                .messages
                .iter_mut()
                .find(|message| message.receipt_handle.as_deref() == Some(receipt_handle))
                .ok_or_else(|| {
                    QueueError::InvalidMessage(format!("receipt handle is invalid: {receipt_handle}"))
                })?;
            message.visible_at = Instant::now() + timeout;
            Ok(())
        })
    }
}
