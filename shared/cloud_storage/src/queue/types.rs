use std::time::Duration;

/// JSON object carried as a message body
pub type Body = serde_json::Map<String, serde_json::Value>;

/// A message received from the queue
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// The decoded message body
    pub body: Body,
    /// Receipt handle of this delivery, needed to delete the message or change its visibility
    pub receipt_handle: String,
}

/// A single delivery as returned by the backend, before the body is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    /// Raw message body
    pub body: String,
    /// Receipt handle of this delivery
    pub receipt_handle: String,
}

/// Configuration for a queue
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Name of the queue, used to look up its URL
    pub queue_name: String,
    /// How long a receive waits for a message (long polling), at most 20 seconds
    pub wait_time: Duration,
}

impl QueueConfig {
    /// Creates a queue configuration with no long polling
    #[must_use]
    pub fn new(queue_name: impl Into<String>) -> Self {
        Self {
            queue_name: queue_name.into(),
            wait_time: Duration::ZERO,
        }
    }

    /// Sets the long polling wait time
    #[must_use]
    pub const fn with_wait_time(mut self, wait_time: Duration) -> Self {
        self.wait_time = wait_time;
        self
    }
}
