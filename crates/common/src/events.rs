//! Event schemas shared between producers and consumers.
//!
//! These are flat, immutable facts: constructed once by the publishing
//! service, serialized as the broker message value, and deserialized
//! identically on the consuming side. Prices and amounts are carried as
//! plain JSON numbers; no arithmetic is performed on them.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Published to `product-created-events-topic` after a product is created.
///
/// The `product_id` is generated server-side before the event is built, so
/// the same id appears in every log line, the message key, and the HTTP
/// response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreatedEvent {
    pub product_id: ProductId,
    pub title: String,
    pub price: f64,
    pub quantity: u32,
}

impl ProductCreatedEvent {
    pub fn new(product_id: ProductId, title: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            product_id,
            title: title.into(),
            price,
            quantity,
        }
    }
}

/// Published to `withdraw-money-topic` when a transfer starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequestedEvent {
    pub sender_id: String,
    pub recipient_id: String,
    pub amount: f64,
}

/// Published to `deposit-money-topic` once the withdrawal leg succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRequestedEvent {
    pub sender_id: String,
    pub recipient_id: String,
    pub amount: f64,
}
