use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when publishing a record to the broker.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The broker did not acknowledge the record within the configured
    /// timeout. Fatal to the synchronous request path.
    #[error("broker did not acknowledge within {0:?}")]
    Timeout(Duration),

    /// The broker rejected the record.
    #[error("broker rejected the record: {0}")]
    Rejected(String),

    /// The connection to the broker was lost before an acknowledgment
    /// arrived.
    #[error("broker connection lost before acknowledgment")]
    Disconnected,

    /// The record payload could not be serialized or deserialized.
    #[error("record payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for broker operations.
pub type Result<T> = std::result::Result<T, PublishError>;
