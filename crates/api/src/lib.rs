//! HTTP API server for the product and transfer flows.
//!
//! Wires the product creation service, the transfer service, and the
//! notification handler onto one in-memory broker, with structured logging
//! (tracing) and Prometheus metrics. Wiring is explicit: the composition
//! root constructs every collaborator and registers the topic subscription
//! at startup.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use broker::{EventProducer, InMemoryBroker};
use metrics_exporter_prometheus::PrometheusHandle;
use notifications::ProductEventHandler;
use products::{PRODUCT_CREATED_TOPIC, ProductService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use transfers::{InMemoryAccountGateway, InMemoryTransferRepository, TransferService};

use routes::products::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<P: EventProducer + 'static>(
    state: Arc<AppState<P>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products/async", post(routes::products::create_async::<P>))
        .route("/products/sync", post(routes::products::create_sync::<P>))
        .route("/transfers", post(routes::transfers::create::<P>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state wired onto the given broker.
///
/// Registers the product topic subscription and starts the notification
/// handler before any request can be served. Returns the gateway so tests
/// (and operators poking at a dev instance) can toggle its availability.
pub fn create_default_state(
    broker: Arc<InMemoryBroker>,
) -> (
    Arc<AppState<InMemoryBroker>>,
    ProductEventHandler,
    InMemoryAccountGateway,
) {
    let product_service = ProductService::new(broker.clone(), PRODUCT_CREATED_TOPIC);

    let gateway = InMemoryAccountGateway::new();
    let transfer_service = TransferService::new(
        broker.clone(),
        InMemoryTransferRepository::new(),
        gateway.clone(),
    );

    let notification_handler = ProductEventHandler::new();
    notification_handler.spawn(broker.subscribe(PRODUCT_CREATED_TOPIC));

    let state = Arc::new(AppState {
        product_service,
        transfer_service,
    });

    (state, notification_handler, gateway)
}
