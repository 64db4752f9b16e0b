use tally_types::money::Money;

use crate::{
    definition::MovementDefinition,
    primitives::{AccountableRef, Currency, DebitOrCredit},
};

use super::error::ExecutionError;

/// One account leg of a proposed or reconstructed posting.
///
/// Sign convention: [`Movement::signed_amount`] is positive for debits
/// and negative for credits; every balance check in the engine sums
/// these per currency.
#[derive(Debug, Clone)]
pub struct Movement {
    definition: MovementDefinition,
    accountable: Option<AccountableRef>,
    amount: Money,
}

/// What makes two movements "the same leg": account, side, accountable
/// and currency. The amount is deliberately excluded: reconciliation
/// measures exactly the amount difference of identical legs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegIdentity {
    pub account_name: String,
    pub direction: DebitOrCredit,
    pub accountable: Option<AccountableRef>,
    pub currency: Currency,
}

impl Movement {
    pub(super) fn new(
        definition: MovementDefinition,
        accountable: Option<AccountableRef>,
        amount: Money,
    ) -> Result<Self, ExecutionError> {
        match (definition.accountable_kind(), accountable.as_ref()) {
            (None, None) => {}
            (Some(expected), Some(found)) if expected == found.kind => {}
            (Some(expected), Some(found)) => {
                return Err(ExecutionError::SchemaMismatch(format!(
                    "movement on '{}' expects accountable kind '{expected}', got '{}'",
                    definition.account_name(),
                    found.kind
                )));
            }
            (Some(expected), None) => {
                return Err(ExecutionError::SchemaMismatch(format!(
                    "movement on '{}' requires an accountable of kind '{expected}'",
                    definition.account_name()
                )));
            }
            (None, Some(found)) => {
                return Err(ExecutionError::SchemaMismatch(format!(
                    "movement on '{}' does not take an accountable, got '{}'",
                    definition.account_name(),
                    found.kind
                )));
            }
        }
        if let Some(required) = definition.currency() {
            if required != amount.currency() {
                return Err(ExecutionError::SchemaMismatch(format!(
                    "account '{}' only accepts {required}, got {}",
                    definition.account_name(),
                    amount.currency()
                )));
            }
        }
        Ok(Self {
            definition,
            accountable,
            amount,
        })
    }

    /// Rebuilds a movement from already-posted lines. Net historical
    /// amounts may be negative, so no validation is applied.
    pub(super) fn from_posted(
        definition: MovementDefinition,
        accountable: Option<AccountableRef>,
        amount: Money,
    ) -> Self {
        Self {
            definition,
            accountable,
            amount,
        }
    }

    /// Same leg, different amount; how adjustment deltas are carried.
    pub(super) fn with_amount(&self, amount: Money) -> Self {
        Self {
            definition: self.definition.clone(),
            accountable: self.accountable.clone(),
            amount,
        }
    }

    pub fn direction(&self) -> DebitOrCredit {
        self.definition.direction()
    }

    pub fn account_name(&self) -> &str {
        self.definition.account_name()
    }

    pub fn accountable(&self) -> Option<&AccountableRef> {
        self.accountable.as_ref()
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.amount.currency()
    }

    pub fn is_credit(&self) -> bool {
        self.direction() == DebitOrCredit::Credit
    }

    pub fn signed_amount(&self) -> i128 {
        match self.direction() {
            DebitOrCredit::Debit => i128::from(self.amount.minor_units()),
            DebitOrCredit::Credit => -i128::from(self.amount.minor_units()),
        }
    }

    pub fn leg(&self) -> LegIdentity {
        LegIdentity {
            account_name: self.account_name().to_string(),
            direction: self.direction(),
            accountable: self.accountable.clone(),
            currency: self.currency(),
        }
    }

    pub fn same_leg(&self, other: &Movement) -> bool {
        self.account_name() == other.account_name()
            && self.direction() == other.direction()
            && self.accountable == other.accountable
            && self.currency() == other.currency()
    }
}
