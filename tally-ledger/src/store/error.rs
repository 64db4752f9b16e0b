use thiserror::Error;

use crate::{entry_record::error::EntryRecordError, line::error::LineError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("StoreError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("StoreError - EntryRecord: {0}")]
    EntryRecord(#[from] EntryRecordError),
    #[error("StoreError - Line: {0}")]
    Line(#[from] LineError),
    #[error("StoreError - Unavailable: {0}")]
    Unavailable(String),
}
