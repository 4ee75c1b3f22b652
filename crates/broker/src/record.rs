//! Record types exchanged with the broker.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// A record to be published: topic, message key, optional string headers,
/// and a JSON payload.
///
/// The key determines the destination partition, so all records sharing a
/// key are delivered in send order.
#[derive(Debug, Clone)]
pub struct ProducerRecord {
    pub topic: String,
    pub key: String,
    pub headers: HashMap<String, String>,
    pub payload: serde_json::Value,
}

impl ProducerRecord {
    /// Builds a record by serializing `value` as the message payload.
    pub fn new<T: Serialize>(
        topic: impl Into<String>,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        Ok(Self {
            topic: topic.into(),
            key: key.into(),
            headers: HashMap::new(),
            payload: serde_json::to_value(value)?,
        })
    }

    /// Attaches a string header to the record.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Delivery metadata returned once the broker has accepted a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMetadata {
    pub topic: String,
    pub partition: u32,
    pub offset: u64,
}

impl std::fmt::Display for RecordMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}@{}", self.topic, self.partition, self.offset)
    }
}

/// A record as delivered to a subscriber.
#[derive(Debug, Clone)]
pub struct ConsumerRecord {
    pub topic: String,
    pub partition: u32,
    pub offset: u64,
    pub key: String,
    pub headers: HashMap<String, String>,
    pub payload: serde_json::Value,
}

impl ConsumerRecord {
    /// Deserializes the payload into a typed value.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Payload {
        name: String,
        count: u32,
    }

    #[test]
    fn producer_record_serializes_value() {
        let payload = Payload {
            name: "widget".to_string(),
            count: 2,
        };
        let record = ProducerRecord::new("some-topic", "key-1", &payload).unwrap();

        assert_eq!(record.topic, "some-topic");
        assert_eq!(record.key, "key-1");
        assert_eq!(record.payload["name"], "widget");
        assert_eq!(record.payload["count"], 2);
    }

    #[test]
    fn with_header_accumulates() {
        let record = ProducerRecord::new("t", "k", &serde_json::json!({}))
            .unwrap()
            .with_header("messageId", "abc")
            .with_header("traceId", "xyz");

        assert_eq!(record.headers.get("messageId").unwrap(), "abc");
        assert_eq!(record.headers.get("traceId").unwrap(), "xyz");
    }

    #[test]
    fn consumer_record_payload_as_typed() {
        let record = ConsumerRecord {
            topic: "t".to_string(),
            partition: 0,
            offset: 7,
            key: "k".to_string(),
            headers: HashMap::new(),
            payload: serde_json::json!({"name": "widget", "count": 2}),
        };

        let payload: Payload = record.payload_as().unwrap();
        assert_eq!(payload.count, 2);
    }

    #[test]
    fn record_metadata_display() {
        let metadata = RecordMetadata {
            topic: "orders".to_string(),
            partition: 2,
            offset: 41,
        };
        assert_eq!(metadata.to_string(), "orders-2@41");
    }
}
