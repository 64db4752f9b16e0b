use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use tally_types::{
    entry::{EntryKey, EntryRecordValues},
    line::{LineGroup, LineValues},
};

use crate::{entry_record::NewEntryRecord, line::NewLine};

use super::{error::StoreError, LedgerStore};

/// In-process ledger store for tests and embedded use.
///
/// Same guarantees as the Postgres store: append-only rows, atomic
/// commit, and per-triple serialization (one async mutex per key, so
/// distinct triples do not contend).
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    inner: Arc<Mutex<MemoryInner>>,
    fail_next_commit: Arc<AtomicBool>,
}

#[derive(Default)]
struct MemoryInner {
    entries: Vec<EntryRecordValues>,
    lines: Vec<LineValues>,
    locks: HashMap<EntryKey, Arc<tokio::sync::Mutex<()>>>,
}

pub struct MemoryOperation {
    _guard: OwnedMutexGuard<()>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `commit_entry` fail with no rows written;
    /// subsequent commits succeed again.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Snapshot of every committed entry row, in insertion order.
    pub fn entries(&self) -> Vec<EntryRecordValues> {
        self.inner.lock().expect("poisoned mutex").entries.clone()
    }

    /// Snapshot of every committed line, in insertion order.
    pub fn lines(&self) -> Vec<LineValues> {
        self.inner.lock().expect("poisoned mutex").lines.clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    type Op = MemoryOperation;

    async fn begin_execution(&self, key: &EntryKey) -> Result<Self::Op, StoreError> {
        let lock = {
            let mut inner = self.inner.lock().expect("poisoned mutex");
            Arc::clone(inner.locks.entry(key.clone()).or_default())
        };
        let guard = lock.lock_owned().await;
        Ok(MemoryOperation { _guard: guard })
    }

    async fn find_latest_entry(
        &self,
        _op: &mut Self::Op,
        key: &EntryKey,
    ) -> Result<Option<EntryRecordValues>, StoreError> {
        let inner = self.inner.lock().expect("poisoned mutex");
        Ok(inner.entries.iter().rev().find(|e| &e.key() == key).cloned())
    }

    async fn sum_lines_grouped(
        &self,
        _op: &mut Self::Op,
        key: &EntryKey,
    ) -> Result<Vec<LineGroup>, StoreError> {
        let inner = self.inner.lock().expect("poisoned mutex");
        let mut groups: Vec<LineGroup> = Vec::new();
        let matching = inner.lines.iter().filter(|line| {
            line.tenant == key.tenant
                && line.entry_code == key.code
                && line.document == key.document
        });
        for line in matching {
            let existing = groups.iter_mut().find(|group| {
                group.account_name == line.account_name
                    && group.direction == line.direction
                    && group.accountable == line.accountable
                    && group.currency == line.amount.currency()
            });
            match existing {
                Some(group) => group.minor_units += line.amount.minor_units(),
                None => groups.push(LineGroup {
                    account_name: line.account_name.clone(),
                    direction: line.direction,
                    accountable: line.accountable.clone(),
                    currency: line.amount.currency(),
                    minor_units: line.amount.minor_units(),
                }),
            }
        }
        Ok(groups)
    }

    async fn commit_entry(
        &self,
        op: Self::Op,
        entry: NewEntryRecord,
        lines: Vec<NewLine>,
    ) -> Result<(EntryRecordValues, Vec<LineValues>), StoreError> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            drop(op);
            return Err(StoreError::Unavailable(
                "injected commit failure".to_string(),
            ));
        }
        let entry_values = entry.to_values();
        let line_values: Vec<_> = lines.iter().map(NewLine::to_values).collect();
        {
            let mut inner = self.inner.lock().expect("poisoned mutex");
            inner.entries.push(entry_values.clone());
            inner.lines.extend(line_values.iter().cloned());
        }
        drop(op);
        Ok((entry_values, line_values))
    }

    async fn abort(&self, op: Self::Op) -> Result<(), StoreError> {
        drop(op);
        Ok(())
    }
}
