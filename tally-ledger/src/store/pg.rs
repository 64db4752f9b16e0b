use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use tally_types::{
    entry::{EntryKey, EntryRecordValues},
    line::{LineGroup, LineValues},
};

use crate::{
    entry_record::{EntryRecordRepo, NewEntryRecord},
    line::{LineRepo, NewLine},
};

use super::{error::StoreError, LedgerStore};

/// Postgres-backed ledger store.
///
/// `begin_execution` opens a transaction and takes a transaction-scoped
/// advisory lock on a hash of the triple, so concurrent executions of
/// the same logical entry serialize while other triples proceed.
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
    entries: EntryRecordRepo,
    lines: LineRepo,
}

impl PgLedgerStore {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            pool: pool.clone(),
            entries: EntryRecordRepo::new(pool),
            lines: LineRepo::new(pool),
        }
    }

    fn lock_key(key: &EntryKey) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            key.tenant.kind, key.tenant.id, key.code, key.document.kind, key.document.id
        )
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    type Op = Transaction<'static, Postgres>;

    async fn begin_execution(&self, key: &EntryKey) -> Result<Self::Op, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(Self::lock_key(key))
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    async fn find_latest_entry(
        &self,
        op: &mut Self::Op,
        key: &EntryKey,
    ) -> Result<Option<EntryRecordValues>, StoreError> {
        Ok(self.entries.find_latest(op, key).await?)
    }

    async fn sum_lines_grouped(
        &self,
        op: &mut Self::Op,
        key: &EntryKey,
    ) -> Result<Vec<LineGroup>, StoreError> {
        Ok(self.lines.sum_grouped(op, key).await?)
    }

    async fn commit_entry(
        &self,
        mut op: Self::Op,
        entry: NewEntryRecord,
        lines: Vec<NewLine>,
    ) -> Result<(EntryRecordValues, Vec<LineValues>), StoreError> {
        let entry_values = self.entries.create_in_tx(&mut op, &entry).await?;
        let line_values = self.lines.create_all(&mut op, &lines).await?;
        op.commit().await?;
        Ok((entry_values, line_values))
    }

    async fn abort(&self, op: Self::Op) -> Result<(), StoreError> {
        op.rollback().await?;
        Ok(())
    }
}
