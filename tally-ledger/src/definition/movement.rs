use crate::primitives::{Currency, DebitOrCredit};

use super::account::{AccountDefinition, AccountType};

/// One declared leg of an entry: the side and account it may post
/// against, and the accountable kind that leg tracks. Account
/// constraints are copied in at build time so movement validation needs
/// no registry access.
#[derive(Debug, Clone)]
pub struct MovementDefinition {
    direction: DebitOrCredit,
    account_name: String,
    account_type: AccountType,
    currency: Option<Currency>,
    accountable_kind: Option<String>,
}

impl MovementDefinition {
    pub(super) fn new(
        direction: DebitOrCredit,
        account: &AccountDefinition,
        accountable_kind: Option<String>,
    ) -> Self {
        Self {
            direction,
            account_name: account.name().to_string(),
            account_type: account.account_type(),
            currency: account.currency(),
            accountable_kind,
        }
    }

    pub fn direction(&self) -> DebitOrCredit {
        self.direction
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn accountable_kind(&self) -> Option<&str> {
        self.accountable_kind.as_deref()
    }

    pub fn matches(
        &self,
        direction: DebitOrCredit,
        account_name: &str,
        accountable_kind: Option<&str>,
    ) -> bool {
        self.direction == direction
            && self.account_name == account_name
            && self.accountable_kind.as_deref() == accountable_kind
    }
}
