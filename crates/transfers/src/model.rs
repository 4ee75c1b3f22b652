use chrono::{DateTime, Utc};
use common::TransferId;
use serde::{Deserialize, Serialize};

/// Inbound request body for a money transfer.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub sender_id: String,
    pub recipient_id: String,
    pub amount: f64,
}

/// Persisted record of a transfer, written before any event is published.
///
/// The id is assigned server-side when the record is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub transfer_id: TransferId,
    pub sender_id: String,
    pub recipient_id: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl TransferRecord {
    /// Builds a record from a request, assigning a fresh transfer id.
    pub fn from_request(request: &TransferRequest) -> Self {
        Self {
            transfer_id: TransferId::new(),
            sender_id: request.sender_id.clone(),
            recipient_id: request.recipient_id.clone(),
            amount: request.amount,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TransferRequest {
        TransferRequest {
            sender_id: "alice".to_string(),
            recipient_id: "bob".to_string(),
            amount: 25.0,
        }
    }

    #[test]
    fn from_request_assigns_fresh_ids() {
        let r1 = TransferRecord::from_request(&request());
        let r2 = TransferRecord::from_request(&request());

        assert_ne!(r1.transfer_id, r2.transfer_id);
        assert_eq!(r1.sender_id, "alice");
        assert_eq!(r1.amount, 25.0);
    }

    #[test]
    fn request_deserializes_from_json() {
        let request: TransferRequest = serde_json::from_str(
            r#"{"sender_id":"alice","recipient_id":"bob","amount":25.0}"#,
        )
        .unwrap();
        assert_eq!(request.recipient_id, "bob");
    }
}
