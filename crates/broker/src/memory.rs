//! In-memory broker implementation.
//!
//! Provides the same producer interface as a real broker client: keyed
//! partitioning, per-partition offsets, and subscriber fan-out. Failure
//! injection knobs make it usable as the mock broker in service and API
//! tests.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::error::{PublishError, Result};
use crate::producer::{DeliveryHandle, EventProducer};
use crate::record::{ConsumerRecord, ProducerRecord, RecordMetadata};

const DEFAULT_PARTITIONS: u32 = 3;
const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(5);

struct TopicState {
    next_offsets: Vec<u64>,
    log: Vec<ConsumerRecord>,
    subscribers: Vec<mpsc::UnboundedSender<ConsumerRecord>>,
}

impl TopicState {
    fn with_partitions(count: u32) -> Self {
        Self {
            next_offsets: vec![0; count as usize],
            log: Vec::new(),
            subscribers: Vec::new(),
        }
    }
}

#[derive(Default)]
struct BrokerState {
    topics: HashMap<String, TopicState>,
    fail_on_send: bool,
    never_acknowledge: bool,
    // Senders held here never resolve; models a broker that accepts the
    // record but whose acknowledgment never arrives.
    parked: Vec<oneshot::Sender<Result<RecordMetadata>>>,
}

/// In-memory, partitioned broker.
///
/// Records with the same key hash to the same partition and are appended
/// under a single write lock, so per-key send order is preserved. Cross-key
/// order is unspecified.
#[derive(Clone)]
pub struct InMemoryBroker {
    state: Arc<RwLock<BrokerState>>,
    partition_count: u32,
    ack_timeout: Duration,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBroker {
    /// Creates a broker with the default partition count and ack timeout.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(BrokerState::default())),
            partition_count: DEFAULT_PARTITIONS,
            ack_timeout: DEFAULT_ACK_TIMEOUT,
        }
    }

    /// Sets the acknowledgment timeout for `send_and_confirm`.
    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = timeout;
        self
    }

    /// Sets the number of partitions per topic (minimum 1).
    pub fn with_partitions(mut self, count: u32) -> Self {
        self.partition_count = count.max(1);
        self
    }

    /// Registers a subscriber for a topic.
    ///
    /// The returned channel yields records published after this call; there
    /// is no replay of earlier records.
    pub fn subscribe(&self, topic: &str) -> mpsc::UnboundedReceiver<ConsumerRecord> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.write().unwrap();
        state
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| TopicState::with_partitions(self.partition_count))
            .subscribers
            .push(tx);
        rx
    }

    /// Configures every subsequent send to be rejected by the broker.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Configures the broker to accept sends but never acknowledge them.
    pub fn set_never_acknowledge(&self, never: bool) {
        self.state.write().unwrap().never_acknowledge = never;
    }

    /// Returns all records published to a topic, in append order.
    pub fn records(&self, topic: &str) -> Vec<ConsumerRecord> {
        let state = self.state.read().unwrap();
        state
            .topics
            .get(topic)
            .map(|t| t.log.clone())
            .unwrap_or_default()
    }

    /// Returns the number of records published to a topic.
    pub fn record_count(&self, topic: &str) -> usize {
        let state = self.state.read().unwrap();
        state.topics.get(topic).map(|t| t.log.len()).unwrap_or(0)
    }

    fn partition_for(&self, key: &str) -> u32 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % u64::from(self.partition_count)) as u32
    }

    fn append(&self, state: &mut BrokerState, record: ProducerRecord) -> RecordMetadata {
        let partition = self.partition_for(&record.key);
        let topic = state
            .topics
            .entry(record.topic.clone())
            .or_insert_with(|| TopicState::with_partitions(self.partition_count));

        let offset = topic.next_offsets[partition as usize];
        topic.next_offsets[partition as usize] += 1;

        let delivered = ConsumerRecord {
            topic: record.topic.clone(),
            partition,
            offset,
            key: record.key,
            headers: record.headers,
            payload: record.payload,
        };
        topic.log.push(delivered.clone());
        topic
            .subscribers
            .retain(|sub| sub.send(delivered.clone()).is_ok());

        RecordMetadata {
            topic: record.topic,
            partition,
            offset,
        }
    }
}

#[async_trait]
impl EventProducer for InMemoryBroker {
    async fn send(&self, record: ProducerRecord) -> Result<DeliveryHandle> {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            let _ = tx.send(Err(PublishError::Rejected(
                "simulated broker failure".to_string(),
            )));
        } else if state.never_acknowledge {
            state.parked.push(tx);
        } else {
            let metadata = self.append(&mut state, record);
            let _ = tx.send(Ok(metadata));
        }

        Ok(DeliveryHandle::new(rx))
    }

    async fn send_and_confirm(&self, record: ProducerRecord) -> Result<RecordMetadata> {
        let handle = self.send(record).await?;
        match tokio::time::timeout(self.ack_timeout, handle.resolve()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(PublishError::Timeout(self.ack_timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str, key: &str, n: u64) -> ProducerRecord {
        ProducerRecord::new(topic, key, &serde_json::json!({ "n": n })).unwrap()
    }

    #[tokio::test]
    async fn send_resolves_with_metadata() {
        let broker = InMemoryBroker::new();

        let handle = broker.send(record("t", "k", 0)).await.unwrap();
        let metadata = handle.resolve().await.unwrap();

        assert_eq!(metadata.topic, "t");
        assert_eq!(metadata.offset, 0);
        assert_eq!(broker.record_count("t"), 1);
    }

    #[tokio::test]
    async fn same_key_stays_on_one_partition_in_send_order() {
        let broker = InMemoryBroker::new();

        for n in 0..5 {
            broker
                .send_and_confirm(record("t", "same-key", n))
                .await
                .unwrap();
        }

        let records = broker.records("t");
        assert_eq!(records.len(), 5);
        let partition = records[0].partition;
        for (n, rec) in records.iter().enumerate() {
            assert_eq!(rec.partition, partition);
            assert_eq!(rec.offset, n as u64);
            assert_eq!(rec.payload["n"], n as u64);
        }
    }

    #[tokio::test]
    async fn offsets_are_per_partition() {
        let broker = InMemoryBroker::new().with_partitions(1);

        let m1 = broker.send_and_confirm(record("t", "a", 0)).await.unwrap();
        let m2 = broker.send_and_confirm(record("t", "b", 1)).await.unwrap();

        assert_eq!(m1.offset, 0);
        assert_eq!(m2.offset, 1);
    }

    #[tokio::test]
    async fn subscriber_receives_published_records() {
        let broker = InMemoryBroker::new();
        let mut rx = broker.subscribe("t");

        broker.send_and_confirm(record("t", "k", 7)).await.unwrap();

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.key, "k");
        assert_eq!(delivered.payload["n"], 7);
    }

    #[tokio::test]
    async fn no_replay_for_late_subscribers() {
        let broker = InMemoryBroker::new();
        broker.send_and_confirm(record("t", "k", 0)).await.unwrap();

        let mut rx = broker.subscribe("t");
        broker.send_and_confirm(record("t", "k", 1)).await.unwrap();

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.payload["n"], 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn fail_on_send_rejects_the_delivery() {
        let broker = InMemoryBroker::new();
        broker.set_fail_on_send(true);

        let handle = broker.send(record("t", "k", 0)).await.unwrap();
        assert!(matches!(
            handle.resolve().await,
            Err(PublishError::Rejected(_))
        ));
        assert_eq!(broker.record_count("t"), 0);
    }

    #[tokio::test]
    async fn never_acknowledge_returns_handle_immediately() {
        let broker = InMemoryBroker::new();
        broker.set_never_acknowledge(true);

        let send = tokio::time::timeout(Duration::from_millis(50), broker.send(record("t", "k", 0)));
        let handle = send.await.expect("send must not block").unwrap();

        // The handle itself never resolves.
        let outcome = tokio::time::timeout(Duration::from_millis(50), handle.resolve()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn send_and_confirm_times_out_without_acknowledgment() {
        let broker = InMemoryBroker::new().with_ack_timeout(Duration::from_millis(20));
        broker.set_never_acknowledge(true);

        let result = broker.send_and_confirm(record("t", "k", 0)).await;
        assert!(matches!(result, Err(PublishError::Timeout(_))));
    }

    #[tokio::test]
    async fn dropped_subscribers_are_pruned() {
        let broker = InMemoryBroker::new();
        let rx = broker.subscribe("t");
        drop(rx);

        // Publishing after the subscriber went away must not fail.
        broker.send_and_confirm(record("t", "k", 0)).await.unwrap();
        assert_eq!(broker.record_count("t"), 1);
    }
}
