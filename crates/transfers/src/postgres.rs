//! PostgreSQL-backed transfer repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::TransferId;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::model::TransferRecord;
use crate::repository::TransferRepository;

/// Transfer repository storing records in PostgreSQL.
#[derive(Clone)]
pub struct PostgresTransferRepository {
    pool: PgPool,
}

impl PostgresTransferRepository {
    /// Creates a new PostgreSQL transfer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_record(row: PgRow) -> Result<TransferRecord, RepositoryError> {
        Ok(TransferRecord {
            transfer_id: TransferId::from_uuid(row.try_get::<Uuid, _>("transfer_id")?),
            sender_id: row.try_get("sender_id")?,
            recipient_id: row.try_get("recipient_id")?,
            amount: row.try_get("amount")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl TransferRepository for PostgresTransferRepository {
    async fn save(&self, record: TransferRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO transfers (transfer_id, sender_id, recipient_id, amount, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.transfer_id.as_uuid())
        .bind(&record.sender_id)
        .bind(&record.recipient_id)
        .bind(record.amount)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, id: TransferId) -> Result<Option<TransferRecord>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT transfer_id, sender_id, recipient_id, amount, created_at
            FROM transfers
            WHERE transfer_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_record).transpose()
    }
}
