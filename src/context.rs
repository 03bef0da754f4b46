//! Two lifetime tiers for shared resources: the application scope
//! (config, database pool) built once in `main`, and the request scope
//! (one transaction manager per incoming update).

use anyhow::Result;
use std::sync::Arc;

use crate::config::BotConfig;
use crate::database::connection::DatabaseManager;
use crate::database::transaction::{SqlxTransactionManager, TransactionManager};

/// Application-scoped object graph. Cloned into the dispatcher's
/// dependency map; all clones share the same pool.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<BotConfig>,
    pub db: DatabaseManager,
}

impl AppContext {
    pub async fn initialize(config: BotConfig) -> Result<Self> {
        let db = DatabaseManager::new(&config.db).await?;
        db.run_migrations().await?;
        Ok(Self {
            config: Arc::new(config),
            db,
        })
    }

    /// Opens the request-scoped unit of work. If the handler bails
    /// before committing, dropping the box rolls the transaction back
    /// and returns the connection to the pool.
    pub async fn begin_request(&self) -> Result<Box<dyn TransactionManager>> {
        let tx = self.db.pool.begin().await?;
        Ok(Box::new(SqlxTransactionManager::new(tx)))
    }
}
