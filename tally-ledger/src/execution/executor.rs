use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use tracing::instrument;

use tally_types::{
    entry::EntryRecordValues,
    line::LineValues,
    money::Money,
};

use crate::{
    definition::DefinitionRegistry,
    entry_record::NewEntryRecord,
    line::NewLine,
    primitives::{Currency, DocumentRef, EntryId, LineId, TenantRef},
    store::LedgerStore,
};

use super::{entry::ExecutableEntry, error::ExecutionError, movement::Movement};

/// Outcome of one [`EntryExecutor::execute`] call.
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// A new entry row (first posting or adjustment) was committed.
    Posted {
        entry: EntryRecordValues,
        lines: Vec<LineValues>,
    },
    /// Re-submission matched what is already posted; nothing was
    /// written.
    Unchanged,
}

impl ExecutionOutcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn entry(&self) -> Option<&EntryRecordValues> {
        match self {
            Self::Posted { entry, .. } => Some(entry),
            Self::Unchanged => None,
        }
    }

    pub fn lines(&self) -> &[LineValues] {
        match self {
            Self::Posted { lines, .. } => lines,
            Self::Unchanged => &[],
        }
    }
}

/// The posting engine: validates a proposed movement set, reconciles it
/// against what is already posted for the triple, and commits the
/// result in one store transaction. The only component with side
/// effects.
pub struct EntryExecutor<'a, S> {
    registry: &'a DefinitionRegistry,
    store: &'a S,
}

impl<'a, S: LedgerStore> EntryExecutor<'a, S> {
    pub fn new(registry: &'a DefinitionRegistry, store: &'a S) -> Self {
        Self { registry, store }
    }

    /// Resolves the tenant and entry definitions and opens a transient
    /// entry for movement accumulation. The effective date arrives as an
    /// ISO-8601 string, as postings do from the outside world.
    pub fn entry(
        &self,
        tenant: &TenantRef,
        document: DocumentRef,
        code: &str,
        effective: &str,
    ) -> Result<ExecutableEntry<'a>, ExecutionError> {
        let tenant_definition = self
            .registry
            .find_tenant(&tenant.kind)
            .ok_or_else(|| ExecutionError::UnknownTenant(tenant.kind.clone()))?;
        let entry_definition =
            tenant_definition
                .find_entry(code)
                .ok_or_else(|| ExecutionError::UnknownEntry {
                    tenant: tenant.kind.clone(),
                    code: code.to_string(),
                })?;
        if document.kind != entry_definition.document_kind() {
            return Err(ExecutionError::InvalidDocument {
                code: code.to_string(),
                expected: entry_definition.document_kind().to_string(),
                found: document.kind.clone(),
            });
        }
        let effective: NaiveDate = effective.parse()?;
        Ok(ExecutableEntry::new(
            tenant.clone(),
            entry_definition,
            document,
            effective,
        ))
    }

    #[instrument(name = "tally_ledger.execute_entry", skip(self, entry), fields(code = entry.code()), err)]
    pub async fn execute(
        &self,
        entry: ExecutableEntry<'_>,
    ) -> Result<ExecutionOutcome, ExecutionError> {
        if entry.movements().is_empty() {
            return Err(ExecutionError::EmptyPosting);
        }
        check_trial_balance(entry.movements(), false)?;

        let key = entry.key();
        let mut op = self.store.begin_execution(&key).await?;
        let existing = self.store.find_latest_entry(&mut op, &key).await?;

        match existing {
            None => {
                let (record, lines) = build_records(&entry, entry.movements().to_vec());
                let (entry_values, line_values) =
                    self.store.commit_entry(op, record, lines).await?;
                Ok(ExecutionOutcome::Posted {
                    entry: entry_values,
                    lines: line_values,
                })
            }
            Some(previous) => {
                let old = entry.old_movements(self.store, &mut op).await?;
                let adjustments = reconcile(old, entry.movements().to_vec())?;
                if adjustments.is_empty() {
                    self.store.abort(op).await?;
                    return Ok(ExecutionOutcome::Unchanged);
                }
                check_trial_balance(&adjustments, true)?;
                if entry.effective() < previous.effective {
                    return Err(ExecutionError::NonMonotonicAdjustment {
                        adjustment: entry.effective(),
                        existing: previous.effective,
                    });
                }
                let (record, lines) = build_records(&entry, adjustments);
                let (entry_values, line_values) =
                    self.store.commit_entry(op, record, lines).await?;
                Ok(ExecutionOutcome::Posted {
                    entry: entry_values,
                    lines: line_values,
                })
            }
        }
    }
}

/// Diffs the net historical movements against the proposed set. Matched
/// legs contribute their amount difference (on the leg's original
/// side), legs missing from the proposal reconcile against zero, and
/// proposed legs with no history are carried over as-is. An empty
/// result means the proposal already matches what is posted.
fn reconcile(old: Vec<Movement>, new: Vec<Movement>) -> Result<Vec<Movement>, ExecutionError> {
    let mut pool = new;
    let mut adjustments = Vec::new();
    for old_movement in old {
        let matched = pool
            .iter()
            .position(|m| m.same_leg(&old_movement))
            .map(|idx| pool.remove(idx));
        let new_units = matched.map(|m| m.amount().minor_units()).unwrap_or(0);
        let delta = new_units
            .checked_sub(old_movement.amount().minor_units())
            .ok_or(ExecutionError::AmountOverflow)?;
        if delta != 0 {
            let amount = Money::new(delta, old_movement.currency());
            adjustments.push(old_movement.with_amount(amount));
        }
    }
    adjustments.extend(pool);
    Ok(adjustments)
}

fn check_trial_balance(movements: &[Movement], adjustment: bool) -> Result<(), ExecutionError> {
    let mut balances: HashMap<Currency, i128> = HashMap::new();
    for movement in movements {
        *balances.entry(movement.currency()).or_default() += movement.signed_amount();
    }
    for (currency, balance) in balances {
        if balance != 0 {
            return Err(if adjustment {
                ExecutionError::UnbalancedAdjustment { currency, balance }
            } else {
                ExecutionError::UnbalancedEntry { currency, balance }
            });
        }
    }
    Ok(())
}

fn build_records(
    entry: &ExecutableEntry<'_>,
    movements: Vec<Movement>,
) -> (NewEntryRecord, Vec<NewLine>) {
    let entry_id = EntryId::new();
    let created_at = Utc::now();
    let record = NewEntryRecord::builder()
        .id(entry_id)
        .tenant(entry.tenant().clone())
        .code(entry.code())
        .document(entry.document().clone())
        .effective(entry.effective())
        .created_at(created_at)
        .build()
        .expect("all NewEntryRecord fields are set");
    let lines = movements
        .into_iter()
        .map(|movement| {
            NewLine::builder()
                .id(LineId::new())
                .entry_id(entry_id)
                .tenant(entry.tenant().clone())
                .entry_code(entry.code())
                .document(entry.document().clone())
                .account_name(movement.account_name())
                .direction(movement.direction())
                .accountable(movement.accountable().cloned())
                .amount(movement.amount())
                .created_at(created_at)
                .build()
                .expect("all NewLine fields are set")
        })
        .collect();
    (record, lines)
}
