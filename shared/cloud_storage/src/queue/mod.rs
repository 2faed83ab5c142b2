//! Queue operations
//!
//! This module provides a JSON message queue on top of AWS SQS. The queue URL
//! is looked up by name on first use and cached for the life of the queue.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Client seam between the queue and SQS
pub mod backend;
/// Error types for queue operations
pub mod error;
/// In-memory queue backend for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
/// Queue façade
pub mod sqs_queue;
/// Common types for queue operations
pub mod types;


pub use backend::QueueBackend;
pub use error::{QueueError, QueueResult};
pub use sqs_queue::Queue;
pub use types::{Body, Message, QueueConfig, ReceivedMessage};
