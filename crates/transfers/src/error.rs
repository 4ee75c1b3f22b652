use broker::PublishError;
use thiserror::Error;

/// Errors from the transfer repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors that can occur while executing a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The transfer record could not be persisted.
    #[error("failed to persist transfer record: {0}")]
    Repository(#[from] RepositoryError),

    /// A transfer event could not be handed to the broker.
    #[error("failed to publish transfer event: {0}")]
    Publish(#[from] PublishError),

    /// The destination account service is unavailable.
    #[error("destination service unavailable: {0}")]
    RemoteUnavailable(String),
}

/// Result type for transfer operations.
pub type Result<T> = std::result::Result<T, TransferError>;
