//! Transfer endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use broker::EventProducer;
use transfers::TransferRequest;

use crate::error::ApiError;
use crate::routes::products::AppState;

/// POST /transfers — execute a transfer. Responds with `true` on success,
/// or 500 with a structured error body when any step fails.
#[tracing::instrument(skip(state, request))]
pub async fn create<P: EventProducer + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<bool>, ApiError> {
    let completed = state
        .transfer_service
        .transfer(request)
        .await
        .map_err(|source| ApiError::Transfer {
            source,
            details: "/transfers",
        })?;

    Ok(Json(completed))
}
