use chrono::NaiveDate;

use tally_types::{entry::EntryKey, line::LineGroup, money::Money};

use crate::{
    definition::EntryDefinition,
    primitives::{AccountableRef, DebitOrCredit, DocumentRef, TenantRef},
    store::LedgerStore,
};

use super::{error::ExecutionError, movement::Movement};

/// The transient aggregate of one posting call: the movements proposed
/// for one (tenant, entry code, document) triple. Pure in-memory until
/// handed to [`EntryExecutor::execute`]; on failure it is discarded with
/// no side effects.
///
/// [`EntryExecutor::execute`]: super::EntryExecutor::execute
pub struct ExecutableEntry<'d> {
    pub(super) tenant: TenantRef,
    pub(super) definition: &'d EntryDefinition,
    pub(super) document: DocumentRef,
    pub(super) effective: NaiveDate,
    pub(super) new_movements: Vec<Movement>,
}

impl<'d> ExecutableEntry<'d> {
    pub(super) fn new(
        tenant: TenantRef,
        definition: &'d EntryDefinition,
        document: DocumentRef,
        effective: NaiveDate,
    ) -> Self {
        Self {
            tenant,
            definition,
            document,
            effective,
            new_movements: Vec::new(),
        }
    }

    /// Resolves the declared movement matching the given leg and appends
    /// a movement for it. Accumulation only; no I/O happens here.
    pub fn add_movement(
        &mut self,
        direction: DebitOrCredit,
        account_name: &str,
        accountable: Option<AccountableRef>,
        amount: Money,
    ) -> Result<(), ExecutionError> {
        let definition = self
            .definition
            .find_movement(
                direction,
                account_name,
                accountable.as_ref().map(|a| a.kind.as_str()),
            )
            .ok_or_else(|| ExecutionError::UnknownMovement {
                code: self.definition.code().to_string(),
                direction,
                account_name: account_name.to_string(),
                accountable_kind: accountable.as_ref().map(|a| a.kind.clone()),
            })?;
        let movement = Movement::new(definition.clone(), accountable, amount)?;
        self.new_movements.push(movement);
        Ok(())
    }

    /// Reconstructs what is currently posted for this triple: one
    /// synthetic movement per (account, direction, accountable,
    /// currency) group carrying the net historical amount, independent
    /// of how many prior entry rows contributed to it. Empty if nothing
    /// was posted before.
    pub async fn old_movements<S: LedgerStore>(
        &self,
        store: &S,
        op: &mut S::Op,
    ) -> Result<Vec<Movement>, ExecutionError> {
        let groups = store.sum_lines_grouped(op, &self.key()).await?;
        self.movements_from_groups(groups)
    }

    fn movements_from_groups(
        &self,
        groups: Vec<LineGroup>,
    ) -> Result<Vec<Movement>, ExecutionError> {
        let mut movements = Vec::with_capacity(groups.len());
        for group in groups {
            let definition = self
                .definition
                .find_movement(
                    group.direction,
                    &group.account_name,
                    group.accountable.as_ref().map(|a| a.kind.as_str()),
                )
                .ok_or_else(|| ExecutionError::UnknownMovement {
                    code: self.definition.code().to_string(),
                    direction: group.direction,
                    account_name: group.account_name.clone(),
                    accountable_kind: group.accountable.as_ref().map(|a| a.kind.clone()),
                })?;
            movements.push(Movement::from_posted(
                definition.clone(),
                group.accountable,
                Money::new(group.minor_units, group.currency),
            ));
        }
        Ok(movements)
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            tenant: self.tenant.clone(),
            code: self.definition.code().to_string(),
            document: self.document.clone(),
        }
    }

    pub fn code(&self) -> &str {
        self.definition.code()
    }

    pub fn tenant(&self) -> &TenantRef {
        &self.tenant
    }

    pub fn document(&self) -> &DocumentRef {
        &self.document
    }

    pub fn effective(&self) -> NaiveDate {
        self.effective
    }

    pub fn movements(&self) -> &[Movement] {
        &self.new_movements
    }
}
