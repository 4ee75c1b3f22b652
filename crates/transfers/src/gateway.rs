//! Remote account gateway trait and in-memory implementation.
//!
//! Stands in for the outbound HTTP call the transfer flow makes to a
//! destination microservice before publishing the deposit leg.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;

use crate::error::TransferError;

/// Trait for checking the destination account service.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Confirms the destination service can accept the transfer.
    ///
    /// An unavailable destination is an error; the transfer must not
    /// proceed to the deposit leg.
    async fn check_destination(&self) -> Result<(), TransferError>;
}

/// In-memory account gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountGateway {
    unavailable: Arc<RwLock<bool>>,
    calls: Arc<AtomicU64>,
}

impl InMemoryAccountGateway {
    /// Creates a gateway that reports the destination as available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to report the destination as unavailable.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().unwrap() = unavailable;
    }

    /// Returns how many times the destination was checked.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountGateway for InMemoryAccountGateway {
    async fn check_destination(&self) -> Result<(), TransferError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if *self.unavailable.read().unwrap() {
            return Err(TransferError::RemoteUnavailable(
                "destination microservice not available".to_string(),
            ));
        }

        tracing::info!("received response from destination service");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn available_by_default() {
        let gateway = InMemoryAccountGateway::new();
        assert!(gateway.check_destination().await.is_ok());
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn unavailable_is_an_error() {
        let gateway = InMemoryAccountGateway::new();
        gateway.set_unavailable(true);

        let result = gateway.check_destination().await;
        assert!(matches!(result, Err(TransferError::RemoteUnavailable(_))));
    }
}
