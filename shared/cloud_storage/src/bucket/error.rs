//! Error types for bucket operations

use aws_sdk_s3::{
    error::SdkError,
    operation::{
        delete_object::DeleteObjectError, get_object::GetObjectError, put_object::PutObjectError,
    },
    primitives::ByteStreamError,
};
use thiserror::Error;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// Error uploading an object
    #[error("Failed to put object to S3")]
    PutObject(#[from] SdkError<PutObjectError>),

    /// Error downloading an object
    #[error("Failed to get object from S3")]
    GetObject(#[from] SdkError<GetObjectError>),

    /// Error deleting an object
    #[error("Failed to delete object from S3")]
    DeleteObject(#[from] SdkError<DeleteObjectError>),

    /// The bucket does not exist
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// Error reading an object body
    #[error("Failed to read object body: {0}")]
    Body(#[from] ByteStreamError),
}

impl BucketError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::PutObject(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::GetObject(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::DeleteObject(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::BucketNotFound(_) | Self::Body(_) => false,
        }
    }

    fn check_sdk_error_status<E>(sdk_err: &SdkError<E>) -> bool {
        if let SdkError::ServiceError(err) = sdk_err {
            return err.raw().status().as_u16() >= 500;
        }
        false
    }
}
