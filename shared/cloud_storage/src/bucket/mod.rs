//! S3 bucket operations

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod backend;
mod client;
mod error;
/// In-memory object backend for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;


pub use aws_sdk_s3::primitives::ByteStream;
pub use backend::ObjectBackend;
pub use client::Bucket;
pub use error::{BucketError, BucketResult};
