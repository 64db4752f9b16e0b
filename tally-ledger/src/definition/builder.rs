use std::collections::HashMap;

use crate::primitives::{Currency, DebitOrCredit};

use super::{
    account::{AccountDefinition, AccountType},
    entry::EntryDefinition,
    error::DefinitionError,
    movement::MovementDefinition,
    tenant::TenantDefinition,
    DefinitionRegistry,
};

/// Builds a [`DefinitionRegistry`] from nested declarations. Each
/// nesting level is its own builder type, only reachable inside the
/// enclosing level's closure, so declarations cannot escape their
/// context. All validation happens here, at startup.
pub struct DefinitionRegistryBuilder {
    tenants: HashMap<String, TenantDefinition>,
}

impl DefinitionRegistryBuilder {
    pub(super) fn new() -> Self {
        Self {
            tenants: HashMap::new(),
        }
    }

    pub fn tenant<F>(mut self, kind: &str, currency: &str, f: F) -> Result<Self, DefinitionError>
    where
        F: FnOnce(TenantBuilder) -> Result<TenantBuilder, DefinitionError>,
    {
        let kind = identifier(kind)?;
        if self.tenants.contains_key(&kind) {
            return Err(DefinitionError::DuplicateTenant(kind));
        }
        let currency: Currency = currency.parse()?;
        let tenant = f(TenantBuilder::new(kind.clone(), currency))?.finish();
        self.tenants.insert(kind, tenant);
        Ok(self)
    }

    pub fn build(self) -> Result<DefinitionRegistry, DefinitionError> {
        Ok(DefinitionRegistry {
            tenants: self.tenants,
        })
    }
}

pub struct TenantBuilder {
    kind: String,
    currency: Currency,
    accounts: HashMap<String, AccountDefinition>,
    entries: HashMap<String, EntryDefinition>,
}

impl TenantBuilder {
    fn new(kind: String, currency: Currency) -> Self {
        Self {
            kind,
            currency,
            accounts: HashMap::new(),
            entries: HashMap::new(),
        }
    }

    /// Declares an account that accepts any currency.
    pub fn account(self, name: &str, account_type: AccountType) -> Result<Self, DefinitionError> {
        self.add_account(name, account_type, None)
    }

    /// Declares an account restricted to a single currency.
    pub fn account_in(
        self,
        name: &str,
        account_type: AccountType,
        currency: &str,
    ) -> Result<Self, DefinitionError> {
        let currency = currency.parse()?;
        self.add_account(name, account_type, Some(currency))
    }

    pub fn asset(self, name: &str) -> Result<Self, DefinitionError> {
        self.account(name, AccountType::Asset)
    }

    pub fn liability(self, name: &str) -> Result<Self, DefinitionError> {
        self.account(name, AccountType::Liability)
    }

    pub fn equity(self, name: &str) -> Result<Self, DefinitionError> {
        self.account(name, AccountType::Equity)
    }

    pub fn income(self, name: &str) -> Result<Self, DefinitionError> {
        self.account(name, AccountType::Income)
    }

    pub fn expense(self, name: &str) -> Result<Self, DefinitionError> {
        self.account(name, AccountType::Expense)
    }

    fn add_account(
        mut self,
        name: &str,
        account_type: AccountType,
        currency: Option<Currency>,
    ) -> Result<Self, DefinitionError> {
        let name = identifier(name)?;
        if self.accounts.contains_key(&name) {
            return Err(DefinitionError::DuplicateAccount {
                tenant: self.kind.clone(),
                name,
            });
        }
        self.accounts.insert(
            name.clone(),
            AccountDefinition::new(name, account_type, currency),
        );
        Ok(self)
    }

    pub fn entry<F>(mut self, code: &str, document_kind: &str, f: F) -> Result<Self, DefinitionError>
    where
        F: FnOnce(EntryMovementsBuilder) -> Result<EntryMovementsBuilder, DefinitionError>,
    {
        let code = identifier(code)?;
        let document_kind = identifier(document_kind)?;
        if self.entries.contains_key(&code) {
            return Err(DefinitionError::DuplicateEntry {
                tenant: self.kind.clone(),
                code,
            });
        }
        let legs = f(EntryMovementsBuilder::new(code.clone()))?.legs;
        if legs.is_empty() {
            return Err(DefinitionError::EmptyEntry(code));
        }
        let mut movements = Vec::with_capacity(legs.len());
        for leg in legs {
            let account =
                self.accounts
                    .get(&leg.account_name)
                    .ok_or_else(|| DefinitionError::UnknownAccount {
                        code: code.clone(),
                        account_name: leg.account_name.clone(),
                    })?;
            movements.push(MovementDefinition::new(
                leg.direction,
                account,
                leg.accountable_kind,
            ));
        }
        self.entries.insert(
            code.clone(),
            EntryDefinition::new(code, document_kind, movements),
        );
        Ok(self)
    }

    fn finish(self) -> TenantDefinition {
        TenantDefinition::new(self.kind, self.currency, self.accounts, self.entries)
    }
}

pub struct EntryMovementsBuilder {
    code: String,
    legs: Vec<DeclaredLeg>,
}

struct DeclaredLeg {
    direction: DebitOrCredit,
    account_name: String,
    accountable_kind: Option<String>,
}

impl EntryMovementsBuilder {
    fn new(code: String) -> Self {
        Self {
            code,
            legs: Vec::new(),
        }
    }

    pub fn debit(
        self,
        account_name: &str,
        accountable_kind: Option<&str>,
    ) -> Result<Self, DefinitionError> {
        self.leg(DebitOrCredit::Debit, account_name, accountable_kind)
    }

    pub fn credit(
        self,
        account_name: &str,
        accountable_kind: Option<&str>,
    ) -> Result<Self, DefinitionError> {
        self.leg(DebitOrCredit::Credit, account_name, accountable_kind)
    }

    fn leg(
        mut self,
        direction: DebitOrCredit,
        account_name: &str,
        accountable_kind: Option<&str>,
    ) -> Result<Self, DefinitionError> {
        let account_name = identifier(account_name)?;
        let accountable_kind = accountable_kind.map(identifier).transpose()?;
        if self.legs.iter().any(|l| {
            l.direction == direction
                && l.account_name == account_name
                && l.accountable_kind == accountable_kind
        }) {
            return Err(DefinitionError::DuplicateMovement {
                code: self.code.clone(),
                direction,
                account_name,
            });
        }
        self.legs.push(DeclaredLeg {
            direction,
            account_name,
            accountable_kind,
        });
        Ok(self)
    }
}

fn identifier(s: &str) -> Result<String, DefinitionError> {
    if s.is_empty() {
        return Err(DefinitionError::InvalidIdentifier(
            "identifiers must not be empty".to_string(),
        ));
    }
    if s.chars().any(char::is_whitespace) {
        return Err(DefinitionError::InvalidIdentifier(format!(
            "identifier '{s}' must not contain whitespace"
        )));
    }
    Ok(s.to_string())
}
