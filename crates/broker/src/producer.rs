//! Producer trait and the pending-delivery handle.

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::{PublishError, Result};
use crate::record::{ProducerRecord, RecordMetadata};

/// A pending delivery.
///
/// Returned by [`EventProducer::send`]; resolves once the broker accepts or
/// rejects the record. Dropping the handle abandons the outcome without
/// cancelling the delivery.
#[derive(Debug)]
pub struct DeliveryHandle {
    rx: oneshot::Receiver<Result<RecordMetadata>>,
}

impl DeliveryHandle {
    pub(crate) fn new(rx: oneshot::Receiver<Result<RecordMetadata>>) -> Self {
        Self { rx }
    }

    /// Waits for the delivery outcome.
    ///
    /// A broker that goes away without reporting resolves to
    /// [`PublishError::Disconnected`].
    pub async fn resolve(self) -> Result<RecordMetadata> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(PublishError::Disconnected),
        }
    }
}

/// Trait for publishing records to a topic.
///
/// Implementations must be thread-safe (Send + Sync); callers never hold a
/// broker connection across calls.
#[async_trait]
pub trait EventProducer: Send + Sync {
    /// Enqueues the record for delivery and returns immediately.
    ///
    /// The returned handle resolves later with delivery metadata or an
    /// error. Must not block the calling task on the broker round trip.
    async fn send(&self, record: ProducerRecord) -> Result<DeliveryHandle>;

    /// Enqueues the record and waits until the broker acknowledges it,
    /// surfacing any failure to the caller.
    ///
    /// The wait is bounded by the implementation's acknowledgment timeout.
    async fn send_and_confirm(&self, record: ProducerRecord) -> Result<RecordMetadata>;
}
