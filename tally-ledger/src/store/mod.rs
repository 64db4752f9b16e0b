//! The persistence seam of the posting engine.

pub mod error;
mod memory;
mod pg;

use async_trait::async_trait;

use tally_types::{
    entry::{EntryKey, EntryRecordValues},
    line::{LineGroup, LineValues},
};

use crate::{entry_record::NewEntryRecord, line::NewLine};

use error::StoreError;

pub use memory::{MemoryLedgerStore, MemoryOperation};
pub use pg::PgLedgerStore;

/// Append-only persistence for entry and line rows.
///
/// An implementation provides equality querying, grouped aggregation
/// and atomic multi-row commit, plus a serialization point per (tenant,
/// code, document) triple: between [`LedgerStore::begin_execution`] and
/// [`LedgerStore::commit_entry`] / [`LedgerStore::abort`] no other
/// operation for the same triple may read or write rows. Operations on
/// different triples must not block each other.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    type Op: Send;

    /// Opens an operation scoped to one posting call and acquires the
    /// triple's serialization point.
    async fn begin_execution(&self, key: &EntryKey) -> Result<Self::Op, StoreError>;

    /// The latest entry row for the triple, by insertion order (never
    /// by effective date).
    async fn find_latest_entry(
        &self,
        op: &mut Self::Op,
        key: &EntryKey,
    ) -> Result<Option<EntryRecordValues>, StoreError>;

    /// Net minor units per (account, direction, accountable, currency)
    /// over every line ever committed for the triple.
    async fn sum_lines_grouped(
        &self,
        op: &mut Self::Op,
        key: &EntryKey,
    ) -> Result<Vec<LineGroup>, StoreError>;

    /// Commits the entry row and all its lines, all-or-nothing.
    async fn commit_entry(
        &self,
        op: Self::Op,
        entry: NewEntryRecord,
        lines: Vec<NewLine>,
    ) -> Result<(EntryRecordValues, Vec<LineValues>), StoreError>;

    /// Releases the operation without writing anything.
    async fn abort(&self, op: Self::Op) -> Result<(), StoreError>;
}
