pub mod events;
pub mod types;

pub use events::{DepositRequestedEvent, ProductCreatedEvent, WithdrawalRequestedEvent};
pub use types::{ProductId, TransferId};
