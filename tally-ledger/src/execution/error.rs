use thiserror::Error;

use crate::primitives::{Currency, DebitOrCredit};
use crate::store::error::StoreError;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("ExecutionError - UnknownTenant: no definition registered for tenant kind '{0}'")]
    UnknownTenant(String),
    #[error("ExecutionError - UnknownEntry: entry '{code}' is not declared for tenant '{tenant}'")]
    UnknownEntry { tenant: String, code: String },
    #[error("ExecutionError - UnknownMovement: no {direction:?} movement on account '{account_name}' with accountable kind {accountable_kind:?} declared for entry '{code}'")]
    UnknownMovement {
        code: String,
        direction: DebitOrCredit,
        account_name: String,
        accountable_kind: Option<String>,
    },
    #[error("ExecutionError - InvalidDocument: entry '{code}' expects a '{expected}' document, got '{found}'")]
    InvalidDocument {
        code: String,
        expected: String,
        found: String,
    },
    #[error("ExecutionError - InvalidDate: {0}")]
    InvalidDate(#[from] chrono::ParseError),
    #[error("ExecutionError - SchemaMismatch: {0}")]
    SchemaMismatch(String),
    #[error("ExecutionError - EmptyPosting: cannot execute an entry without movements")]
    EmptyPosting,
    #[error("ExecutionError - UnbalancedEntry: trial balance for {currency} is {balance}, must be zero")]
    UnbalancedEntry { currency: Currency, balance: i128 },
    #[error("ExecutionError - UnbalancedAdjustment: trial balance for {currency} is {balance}, must be zero")]
    UnbalancedAdjustment { currency: Currency, balance: i128 },
    #[error("ExecutionError - NonMonotonicAdjustment: adjustment date {adjustment} is before the entry it corrects ({existing})")]
    NonMonotonicAdjustment {
        adjustment: chrono::NaiveDate,
        existing: chrono::NaiveDate,
    },
    #[error("ExecutionError - AmountOverflow: movement delta exceeds the representable amount range")]
    AmountOverflow,
    #[error("ExecutionError - Store: {0}")]
    Store(#[from] StoreError),
}
