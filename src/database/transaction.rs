//! Narrow transaction-manager interface over a database transaction:
//! commit, flush (optionally scoped to specific pending writes) and
//! rollback. Failures from the underlying driver propagate unchanged.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{Any, Transaction};

/// A write queued on the manager, addressed by key so a flush can be
/// scoped to a subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub key: String,
    pub sql: String,
}

impl PendingWrite {
    pub fn new(key: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sql: sql.into(),
        }
    }
}

/// Request-scoped unit of work. Object safe so handlers can hold it
/// behind `Box<dyn TransactionManager>` and tests can substitute it.
#[async_trait]
pub trait TransactionManager: Send {
    /// Records a write to be executed on flush or commit.
    fn queue(&mut self, write: PendingWrite);

    /// Executes pending writes inside the transaction. With a scope,
    /// only writes whose key is listed run; the rest stay queued.
    async fn flush(&mut self, scope: Option<&[&str]>) -> Result<()>;

    /// Flushes the remaining writes and commits.
    async fn commit(&mut self) -> Result<()>;

    /// Discards pending writes and rolls the transaction back.
    async fn rollback(&mut self) -> Result<()>;
}

/// The sqlx-backed implementation. Dropping it before commit rolls the
/// transaction back (pool connection returned on every exit path).
pub struct SqlxTransactionManager {
    tx: Option<Transaction<'static, Any>>,
    pending: Vec<PendingWrite>,
}

impl SqlxTransactionManager {
    pub fn new(tx: Transaction<'static, Any>) -> Self {
        Self {
            tx: Some(tx),
            pending: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[PendingWrite] {
        &self.pending
    }

    fn take_tx(&mut self) -> Result<Transaction<'static, Any>> {
        self.tx
            .take()
            .ok_or_else(|| anyhow!("transaction already closed"))
    }
}

#[async_trait]
impl TransactionManager for SqlxTransactionManager {
    fn queue(&mut self, write: PendingWrite) {
        self.pending.push(write);
    }

    async fn flush(&mut self, scope: Option<&[&str]>) -> Result<()> {
        let tx = self
            .tx
            .as_mut()
            .ok_or_else(|| anyhow!("transaction already closed"))?;

        let (run, keep): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|write| match scope {
                Some(keys) => keys.contains(&write.key.as_str()),
                None => true,
            });
        self.pending = keep;

        for write in &run {
            sqlx::query(&write.sql).execute(&mut *tx).await?;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.flush(None).await?;
        self.take_tx()?.commit().await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.pending.clear();
        self.take_tx()?.rollback().await?;
        Ok(())
    }
}
