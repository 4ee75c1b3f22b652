//! Transfer service orchestrating the two-step publish with a remote call.

use std::sync::Arc;

use broker::{EventProducer, ProducerRecord};
use common::{DepositRequestedEvent, TransferId, WithdrawalRequestedEvent};
use serde::Serialize;

use crate::error::Result;
use crate::gateway::AccountGateway;
use crate::model::{TransferRecord, TransferRequest};
use crate::repository::TransferRepository;
use crate::{DEPOSIT_MONEY_TOPIC, WITHDRAW_MONEY_TOPIC};

/// Service executing money transfers.
///
/// Steps: persist the transfer record, publish the withdrawal event, check
/// the destination service, publish the deposit event. A failure stops the
/// sequence where it happened; nothing already published is compensated.
pub struct TransferService<P: EventProducer, R: TransferRepository, G: AccountGateway> {
    producer: Arc<P>,
    repository: R,
    gateway: G,
    withdraw_topic: String,
    deposit_topic: String,
}

impl<P, R, G> TransferService<P, R, G>
where
    P: EventProducer + 'static,
    R: TransferRepository,
    G: AccountGateway,
{
    /// Creates a transfer service publishing to the default topics.
    pub fn new(producer: Arc<P>, repository: R, gateway: G) -> Self {
        Self {
            producer,
            repository,
            gateway,
            withdraw_topic: WITHDRAW_MONEY_TOPIC.to_string(),
            deposit_topic: DEPOSIT_MONEY_TOPIC.to_string(),
        }
    }

    /// Overrides the withdrawal and deposit topics.
    pub fn with_topics(
        mut self,
        withdraw_topic: impl Into<String>,
        deposit_topic: impl Into<String>,
    ) -> Self {
        self.withdraw_topic = withdraw_topic.into();
        self.deposit_topic = deposit_topic.into();
        self
    }

    /// Executes a transfer, returning `true` on success.
    #[tracing::instrument(skip(self, request))]
    pub async fn transfer(&self, request: TransferRequest) -> Result<bool> {
        let result = self.execute(request).await;

        match &result {
            Ok(_) => {
                metrics::counter!("transfers_completed_total").increment(1);
            }
            Err(error) => {
                metrics::counter!("transfers_failed_total").increment(1);
                tracing::error!(%error, "transfer failed");
            }
        }

        result
    }

    async fn execute(&self, request: TransferRequest) -> Result<bool> {
        let withdrawal = WithdrawalRequestedEvent {
            sender_id: request.sender_id.clone(),
            recipient_id: request.recipient_id.clone(),
            amount: request.amount,
        };
        let deposit = DepositRequestedEvent {
            sender_id: request.sender_id.clone(),
            recipient_id: request.recipient_id.clone(),
            amount: request.amount,
        };

        let record = TransferRecord::from_request(&request);
        let transfer_id = record.transfer_id;
        self.repository.save(record).await?;

        self.publish(&self.withdraw_topic, transfer_id, &withdrawal)
            .await?;
        tracing::info!(%transfer_id, "sent event to withdrawal topic");

        self.gateway.check_destination().await?;

        self.publish(&self.deposit_topic, transfer_id, &deposit)
            .await?;
        tracing::info!(%transfer_id, "sent event to deposit topic");

        Ok(true)
    }

    /// Publishes fire-and-forget; delivery failures are only logged, as in
    /// the products async path.
    async fn publish<T: Serialize>(
        &self,
        topic: &str,
        transfer_id: TransferId,
        event: &T,
    ) -> Result<()> {
        let record = ProducerRecord::new(topic, transfer_id.to_string(), event)?;
        let handle = self.producer.send(record).await?;

        let topic_name = topic.to_string();
        tokio::spawn(async move {
            if let Err(error) = handle.resolve().await {
                tracing::error!(topic = %topic_name, %transfer_id, %error, "transfer event delivery failed");
            }
        });

        Ok(())
    }
}
