use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::change_message_visibility::ChangeMessageVisibilityError;
use aws_sdk_sqs::operation::delete_message::DeleteMessageError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use thiserror::Error;

/// Result type alias for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error types for queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    /// Error looking up the queue URL by name
    #[error("Failed to resolve queue URL from SQS")]
    ResolveQueueUrl(#[from] SdkError<GetQueueUrlError>),

    /// Error receiving messages from SQS
    #[error("Failed to receive messages from SQS")]
    ReceiveMessage(#[from] SdkError<ReceiveMessageError>),

    /// Error sending message to SQS
    #[error("Failed to send message to SQS")]
    SendMessage(#[from] SdkError<SendMessageError>),

    /// Error deleting message from SQS
    #[error("Failed to delete message from SQS")]
    DeleteMessage(#[from] SdkError<DeleteMessageError>),

    /// Error changing the visibility timeout of a message
    #[error("Failed to change message visibility in SQS")]
    ChangeVisibility(#[from] SdkError<ChangeMessageVisibilityError>),

    /// The queue does not exist
    #[error("Queue not found: {0}")]
    QueueNotFound(String),

    /// SQS answered the lookup without a URL
    #[error("No queue URL returned for queue: {0}")]
    MissingQueueUrl(String),

    /// Error serializing message to JSON
    #[error("Failed to serialize message: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Error deserializing message from JSON
    #[error("Failed to deserialize message: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Invalid message format
    #[error("Invalid message format: {0}")]
    InvalidMessage(String),

    /// Visibility timeout outside of `[0, 12h]`
    #[error("timeout must be between 0 and 12 hours, both inclusive")]
    InvalidVisibilityTimeout,
}

impl QueueError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::ResolveQueueUrl(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::ReceiveMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::SendMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::DeleteMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::ChangeVisibility(sdk_err) => Self::check_sdk_error_status(sdk_err),
            _ => false,
        }
    }

    fn check_sdk_error_status<E>(sdk_err: &SdkError<E>) -> bool {
        if let SdkError::ServiceError(err) = sdk_err {
            return err.raw().status().as_u16() >= 500;
        }
        false
    }
}
