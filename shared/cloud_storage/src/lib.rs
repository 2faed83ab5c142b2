//! Cloud storage clients
//!
//! This crate provides thin façades over AWS S3 and AWS SQS: a [`Bucket`] for
//! putting, getting and deleting objects by key, and a [`Queue`] for sending,
//! receiving, deleting and re-timing JSON messages.

pub mod bucket;
pub mod config;
pub mod queue;

pub use bucket::{Bucket, BucketError, BucketResult};
pub use config::AwsSettings;
pub use queue::{Body, Message, Queue, QueueConfig, QueueError, QueueResult};
