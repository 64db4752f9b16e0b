use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use tally_types::entry::{EntryKey, EntryRecordValues};

use crate::primitives::*;

use super::{entity::NewEntryRecord, error::EntryRecordError};

#[derive(Debug, Clone)]
pub(crate) struct EntryRecordRepo {
    _pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct EntryRecordRow {
    id: EntryId,
    tenant_kind: String,
    tenant_id: TenantId,
    code: String,
    document_kind: String,
    document_id: DocumentId,
    effective: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<EntryRecordRow> for EntryRecordValues {
    fn from(row: EntryRecordRow) -> Self {
        EntryRecordValues {
            id: row.id,
            tenant: TenantRef::new(row.tenant_kind, row.tenant_id),
            code: row.code,
            document: DocumentRef::new(row.document_kind, row.document_id),
            effective: row.effective,
            created_at: row.created_at,
        }
    }
}

impl EntryRecordRepo {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            _pool: pool.clone(),
        }
    }

    #[instrument(
        level = "trace",
        name = "tally_ledger.entries.find_latest",
        skip(self, db)
    )]
    pub(crate) async fn find_latest(
        &self,
        db: &mut Transaction<'_, Postgres>,
        key: &EntryKey,
    ) -> Result<Option<EntryRecordValues>, EntryRecordError> {
        let row = sqlx::query_as::<_, EntryRecordRow>(
            r#"SELECT id, tenant_kind, tenant_id, code, document_kind, document_id,
                      effective, created_at
               FROM tally_entries
               WHERE tenant_kind = $1 AND tenant_id = $2 AND code = $3
                 AND document_kind = $4 AND document_id = $5
               ORDER BY sequence DESC
               LIMIT 1"#,
        )
        .bind(key.tenant.kind.as_str())
        .bind(key.tenant.id)
        .bind(key.code.as_str())
        .bind(key.document.kind.as_str())
        .bind(key.document.id)
        .fetch_optional(&mut **db)
        .await?;
        Ok(row.map(EntryRecordValues::from))
    }

    #[instrument(
        level = "trace",
        name = "tally_ledger.entries.create",
        skip(self, db, entry)
    )]
    pub(crate) async fn create_in_tx(
        &self,
        db: &mut Transaction<'_, Postgres>,
        entry: &NewEntryRecord,
    ) -> Result<EntryRecordValues, EntryRecordError> {
        sqlx::query(
            r#"INSERT INTO tally_entries
               (id, tenant_kind, tenant_id, code, document_kind, document_id, effective, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(entry.id)
        .bind(entry.tenant.kind.as_str())
        .bind(entry.tenant.id)
        .bind(entry.code.as_str())
        .bind(entry.document.kind.as_str())
        .bind(entry.document.id)
        .bind(entry.effective)
        .bind(entry.created_at)
        .execute(&mut **db)
        .await?;
        Ok(entry.to_values())
    }
}
