use thiserror::Error;

use crate::primitives::{DebitOrCredit, ParseCurrencyError};

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("DefinitionError - InvalidIdentifier: {0}")]
    InvalidIdentifier(String),
    #[error("DefinitionError - InvalidCurrency: {0}")]
    InvalidCurrency(#[from] ParseCurrencyError),
    #[error("DefinitionError - DuplicateTenant: tenant '{0}' is already defined")]
    DuplicateTenant(String),
    #[error("DefinitionError - DuplicateAccount: account '{name}' is already defined for tenant '{tenant}'")]
    DuplicateAccount { tenant: String, name: String },
    #[error("DefinitionError - DuplicateEntry: entry '{code}' is already defined for tenant '{tenant}'")]
    DuplicateEntry { tenant: String, code: String },
    #[error("DefinitionError - DuplicateMovement: {direction:?} on account '{account_name}' is already declared for entry '{code}'")]
    DuplicateMovement {
        code: String,
        direction: DebitOrCredit,
        account_name: String,
    },
    #[error("DefinitionError - UnknownAccount: entry '{code}' references undeclared account '{account_name}'")]
    UnknownAccount { code: String, account_name: String },
    #[error("DefinitionError - EmptyEntry: entry '{0}' declares no movements")]
    EmptyEntry(String),
}
