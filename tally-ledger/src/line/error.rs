use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineError {
    #[error("LineError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
}
