use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntryRecordError {
    #[error("EntryRecordError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
}
