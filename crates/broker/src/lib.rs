//! Broker client adapter.
//!
//! Exposes two send modes against a named, partitioned topic:
//!
//! 1. Fire-and-forget: [`EventProducer::send`] enqueues the record and
//!    returns a [`DeliveryHandle`] that resolves later with delivery
//!    metadata or an error. The calling task is never blocked on the
//!    broker round trip.
//! 2. Confirmed: [`EventProducer::send_and_confirm`] waits until the broker
//!    acknowledges the record (bounded by a configurable timeout) and
//!    surfaces any failure synchronously.
//!
//! Records with the same key are routed to the same partition and arrive in
//! send order; there is no cross-key ordering guarantee.

pub mod error;
pub mod memory;
pub mod producer;
pub mod record;

pub use error::{PublishError, Result};
pub use memory::InMemoryBroker;
pub use producer::{DeliveryHandle, EventProducer};
pub use record::{ConsumerRecord, ProducerRecord, RecordMetadata};
