//! Inbound handler for product created events.
//!
//! Subscribes to the product topic at process start and logs each received
//! event. No deduplication, no ordering enforcement beyond the broker's
//! per-partition order, and no dead-letter handling: a record that fails to
//! decode is logged and skipped.

pub mod handler;

pub use handler::ProductEventHandler;
