use thiserror::Error;

use crate::{
    definition::error::DefinitionError, execution::error::ExecutionError,
    store::error::StoreError,
};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("LedgerError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("LedgerError - Migrate: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
    #[error("LedgerError - Config: {0}")]
    ConfigError(String),
    #[error("LedgerError - Definition: {0}")]
    Definition(#[from] DefinitionError),
    #[error("LedgerError - Execution: {0}")]
    Execution(#[from] ExecutionError),
    #[error("LedgerError - Store: {0}")]
    Store(#[from] StoreError),
}
