//! Transfer orchestration.
//!
//! A transfer saves a record through the repository, publishes a withdrawal
//! event, calls the remote account gateway, and publishes a deposit event.
//! There is no compensation, idempotency key, retry, or durable outbox: a
//! failure partway through leaves already-published events published.

pub mod error;
pub mod gateway;
pub mod model;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RepositoryError, TransferError};
pub use gateway::{AccountGateway, InMemoryAccountGateway};
pub use model::{TransferRecord, TransferRequest};
pub use postgres::PostgresTransferRepository;
pub use repository::{InMemoryTransferRepository, TransferRepository};
pub use service::TransferService;

/// Topic for the withdrawal leg of a transfer.
pub const WITHDRAW_MONEY_TOPIC: &str = "withdraw-money-topic";

/// Topic for the deposit leg of a transfer.
pub const DEPOSIT_MONEY_TOPIC: &str = "deposit-money-topic";
