//! Subscription loop for product created events.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use broker::ConsumerRecord;
use common::ProductCreatedEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handler that logs each product created event it receives.
#[derive(Debug, Clone, Default)]
pub struct ProductEventHandler {
    received: Arc<AtomicU64>,
}

impl ProductEventHandler {
    /// Creates a new handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of events successfully processed.
    pub fn received_count(&self) -> u64 {
        self.received.load(Ordering::SeqCst)
    }

    /// Starts the consumption loop on a background task.
    ///
    /// The loop runs until the subscription channel closes. A failure to
    /// process one record is logged and the loop continues; nothing is
    /// retried or escalated.
    pub fn spawn(&self, mut records: mpsc::UnboundedReceiver<ConsumerRecord>) -> JoinHandle<()> {
        let received = self.received.clone();
        tokio::spawn(async move {
            while let Some(record) = records.recv().await {
                Self::process(&received, record);
            }
            tracing::info!("product event subscription closed");
        })
    }

    fn process(received: &AtomicU64, record: ConsumerRecord) {
        match record.payload_as::<ProductCreatedEvent>() {
            Ok(event) => {
                received.fetch_add(1, Ordering::SeqCst);
                metrics::counter!("notifications_events_received_total").increment(1);
                tracing::info!(
                    product_id = %event.product_id,
                    title = %event.title,
                    partition = record.partition,
                    offset = record.offset,
                    "received a new product created event"
                );
            }
            Err(error) => {
                tracing::warn!(
                    partition = record.partition,
                    offset = record.offset,
                    %error,
                    "skipping undecodable product created event"
                );
            }
        }
    }
}
