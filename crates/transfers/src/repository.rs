//! Transfer repository trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::TransferId;

use crate::error::RepositoryError;
use crate::model::TransferRecord;

/// Trait for persisting transfer records.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait TransferRepository: Send + Sync {
    /// Saves a transfer record.
    async fn save(&self, record: TransferRecord) -> Result<(), RepositoryError>;

    /// Looks up a transfer record by id.
    async fn find(&self, id: TransferId) -> Result<Option<TransferRecord>, RepositoryError>;
}

/// In-memory transfer repository for testing.
///
/// Provides the same interface as the PostgreSQL implementation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransferRepository {
    records: Arc<RwLock<HashMap<TransferId, TransferRecord>>>,
}

impl InMemoryTransferRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of saved records.
    pub fn record_count(&self) -> usize {
        self.records.read().unwrap().len()
    }
}

#[async_trait]
impl TransferRepository for InMemoryTransferRepository {
    async fn save(&self, record: TransferRecord) -> Result<(), RepositoryError> {
        self.records
            .write()
            .unwrap()
            .insert(record.transfer_id, record);
        Ok(())
    }

    async fn find(&self, id: TransferId) -> Result<Option<TransferRecord>, RepositoryError> {
        Ok(self.records.read().unwrap().get(&id).cloned())
    }
}
