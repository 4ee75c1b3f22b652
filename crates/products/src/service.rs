//! Product creation service with fire-and-forget and confirmed publish paths.

use std::sync::Arc;

use broker::{EventProducer, ProducerRecord, PublishError};
use common::{ProductCreatedEvent, ProductId};
use uuid::Uuid;

use crate::request::CreateProductRequest;

/// Service for creating products and publishing the corresponding event.
pub struct ProductService<P: EventProducer> {
    producer: Arc<P>,
    topic: String,
}

impl<P: EventProducer + 'static> ProductService<P> {
    /// Creates a new product service publishing to the given topic.
    pub fn new(producer: Arc<P>, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }

    /// Creates a product and publishes its event fire-and-forget.
    ///
    /// Returns the generated id immediately, without waiting for broker
    /// acknowledgment. A spawned completion task later logs delivery
    /// metadata or the failure; that outcome is never surfaced to the
    /// caller, who has already received a response.
    #[tracing::instrument(skip(self, request))]
    pub async fn create_async(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductId, PublishError> {
        let product_id = ProductId::new();
        let event = ProductCreatedEvent::new(
            product_id,
            request.title,
            request.price,
            request.quantity,
        );

        let record = ProducerRecord::new(self.topic.as_str(), product_id.to_string(), &event)?;
        let handle = self.producer.send(record).await?;

        tokio::spawn(async move {
            match handle.resolve().await {
                Ok(metadata) => {
                    metrics::counter!("products_published_total").increment(1);
                    tracing::info!(%product_id, %metadata, "product created event delivered");
                }
                Err(error) => {
                    metrics::counter!("products_publish_failures_total").increment(1);
                    tracing::error!(%product_id, %error, "failed to deliver product created event");
                }
            }
        });

        metrics::counter!("products_created_async_total").increment(1);
        tracing::info!(%product_id, "returning product id without waiting for acknowledgment");
        Ok(product_id)
    }

    /// Creates a product and waits for the broker to acknowledge the event.
    ///
    /// A random `messageId` header is attached for tracing. On failure the
    /// caller receives the [`PublishError`] and is responsible for turning
    /// it into a user-visible error response.
    #[tracing::instrument(skip(self, request))]
    pub async fn create_sync(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductId, PublishError> {
        let product_id = ProductId::new();
        let event = ProductCreatedEvent::new(
            product_id,
            request.title,
            request.price,
            request.quantity,
        );

        let record = ProducerRecord::new(self.topic.as_str(), product_id.to_string(), &event)?
            .with_header("messageId", Uuid::new_v4().to_string());

        let metadata = self.producer.send_and_confirm(record).await?;

        metrics::counter!("products_published_total").increment(1);
        metrics::counter!("products_created_sync_total").increment(1);
        tracing::info!(
            %product_id,
            topic = %metadata.topic,
            partition = metadata.partition,
            offset = metadata.offset,
            "product created event acknowledged"
        );
        Ok(product_id)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use broker::InMemoryBroker;
    use common::ProductCreatedEvent;

    use super::*;
    use crate::PRODUCT_CREATED_TOPIC;

    fn widget_request() -> CreateProductRequest {
        CreateProductRequest {
            title: "Widget".to_string(),
            price: 9.99,
            quantity: 3,
        }
    }

    fn service_with_broker(broker: &Arc<InMemoryBroker>) -> ProductService<InMemoryBroker> {
        ProductService::new(broker.clone(), PRODUCT_CREATED_TOPIC)
    }

    #[tokio::test]
    async fn returned_id_matches_published_record() {
        let broker = Arc::new(InMemoryBroker::new());
        let service = service_with_broker(&broker);

        let product_id = service.create_sync(widget_request()).await.unwrap();

        let records = broker.records(PRODUCT_CREATED_TOPIC);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, product_id.to_string());

        let event: ProductCreatedEvent = records[0].payload_as().unwrap();
        assert_eq!(event.product_id, product_id);
        assert_eq!(event.title, "Widget");
        assert_eq!(event.quantity, 3);
    }

    #[tokio::test]
    async fn identical_requests_produce_distinct_ids() {
        let broker = Arc::new(InMemoryBroker::new());
        let service = service_with_broker(&broker);

        let id1 = service.create_sync(widget_request()).await.unwrap();
        let id2 = service.create_sync(widget_request()).await.unwrap();
        assert_ne!(id1, id2);

        let id3 = service.create_async(widget_request()).await.unwrap();
        let id4 = service.create_async(widget_request()).await.unwrap();
        assert_ne!(id3, id4);
    }

    #[tokio::test]
    async fn sync_path_attaches_message_id_header() {
        let broker = Arc::new(InMemoryBroker::new());
        let service = service_with_broker(&broker);

        service.create_sync(widget_request()).await.unwrap();

        let records = broker.records(PRODUCT_CREATED_TOPIC);
        let message_id = records[0].headers.get("messageId").unwrap();
        assert!(Uuid::parse_str(message_id).is_ok());
    }

    #[tokio::test]
    async fn async_path_has_no_message_id_header() {
        let broker = Arc::new(InMemoryBroker::new());
        let service = service_with_broker(&broker);

        service.create_async(widget_request()).await.unwrap();

        let records = broker.records(PRODUCT_CREATED_TOPIC);
        assert!(!records[0].headers.contains_key("messageId"));
    }

    #[tokio::test]
    async fn create_async_returns_even_when_broker_never_acknowledges() {
        let broker = Arc::new(InMemoryBroker::new());
        broker.set_never_acknowledge(true);
        let service = service_with_broker(&broker);

        let result = tokio::time::timeout(
            Duration::from_millis(100),
            service.create_async(widget_request()),
        )
        .await;

        assert!(result.expect("must return promptly").is_ok());
    }

    #[tokio::test]
    async fn create_sync_fails_when_broker_rejects() {
        let broker = Arc::new(InMemoryBroker::new());
        broker.set_fail_on_send(true);
        let service = service_with_broker(&broker);

        let result = service.create_sync(widget_request()).await;
        assert!(matches!(result, Err(PublishError::Rejected(_))));
    }

    #[tokio::test]
    async fn create_sync_times_out_when_broker_never_acknowledges() {
        let broker =
            Arc::new(InMemoryBroker::new().with_ack_timeout(Duration::from_millis(20)));
        broker.set_never_acknowledge(true);
        let service = service_with_broker(&broker);

        let result = service.create_sync(widget_request()).await;
        assert!(matches!(result, Err(PublishError::Timeout(_))));
    }
}
