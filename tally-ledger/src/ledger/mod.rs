pub mod config;
pub mod error;

use std::sync::Arc;

use tracing::instrument;

use crate::{
    definition::DefinitionRegistry,
    execution::{EntryExecutor, ExecutableEntry, ExecutionOutcome},
    primitives::{DocumentRef, TenantRef},
    store::PgLedgerStore,
};

pub use config::*;
use error::*;

/// An embeddable double-entry posting ledger on Postgres.
#[derive(Clone)]
pub struct TallyLedger {
    pool: sqlx::PgPool,
    registry: Arc<DefinitionRegistry>,
    store: PgLedgerStore,
}

impl TallyLedger {
    pub async fn init(config: TallyLedgerConfig) -> Result<Self, LedgerError> {
        let pool = match (config.pool, config.pg_con) {
            (Some(pool), None) => pool,
            (None, Some(pg_con)) => {
                let mut pool_opts = sqlx::postgres::PgPoolOptions::new();
                if let Some(max_connections) = config.max_connections {
                    pool_opts = pool_opts.max_connections(max_connections);
                }
                pool_opts.connect(&pg_con).await?
            }
            _ => {
                return Err(LedgerError::ConfigError(
                    "One of pg_con or pool must be set".to_string(),
                ))
            }
        };
        if config.exec_migrations {
            sqlx::migrate!().run(&pool).await?;
        }

        let store = PgLedgerStore::new(&pool);
        Ok(Self {
            pool,
            registry: config.registry,
            store,
        })
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    pub fn store(&self) -> &PgLedgerStore {
        &self.store
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }

    pub fn executor(&self) -> EntryExecutor<'_, PgLedgerStore> {
        EntryExecutor::new(&self.registry, &self.store)
    }

    /// Opens a transient entry for movement accumulation; hand it to
    /// [`TallyLedger::execute`] once every leg is added.
    pub fn entry(
        &self,
        tenant: &TenantRef,
        document: DocumentRef,
        code: &str,
        effective: &str,
    ) -> Result<ExecutableEntry<'_>, LedgerError> {
        Ok(self.executor().entry(tenant, document, code, effective)?)
    }

    #[instrument(name = "tally_ledger.execute", skip(self, entry), err)]
    pub async fn execute(
        &self,
        entry: ExecutableEntry<'_>,
    ) -> Result<ExecutionOutcome, LedgerError> {
        Ok(self.executor().execute(entry).await?)
    }
}
