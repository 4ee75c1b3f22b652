//! Product creation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use broker::EventProducer;
use products::{CreateProductRequest, ProductService};
use transfers::{InMemoryAccountGateway, InMemoryTransferRepository, TransferService};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<P: EventProducer> {
    pub product_service: ProductService<P>,
    pub transfer_service:
        TransferService<P, InMemoryTransferRepository, InMemoryAccountGateway>,
}

/// POST /products/async — create a product without waiting for broker
/// acknowledgment. Responds 201 with the product id as a plain string.
#[tracing::instrument(skip(state, request))]
pub async fn create_async<P: EventProducer + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, String), ApiError> {
    let product_id = state
        .product_service
        .create_async(request)
        .await
        .map_err(|source| ApiError::Publish {
            source,
            details: "/products/async",
        })?;

    Ok((StatusCode::CREATED, product_id.to_string()))
}

/// POST /products/sync — create a product and wait for broker
/// acknowledgment. Responds 201 with the product id, or 500 with a
/// structured error body when publishing fails.
#[tracing::instrument(skip(state, request))]
pub async fn create_sync<P: EventProducer + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, String), ApiError> {
    let product_id = state
        .product_service
        .create_sync(request)
        .await
        .map_err(|source| ApiError::Publish {
            source,
            details: "/products/sync",
        })?;

    Ok((StatusCode::CREATED, product_id.to_string()))
}
