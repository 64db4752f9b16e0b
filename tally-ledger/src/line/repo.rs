use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::instrument;

use tally_types::{
    entry::EntryKey,
    line::{LineGroup, LineValues},
};

use crate::primitives::*;

use super::{entity::NewLine, error::LineError};

#[derive(Debug, Clone)]
pub(crate) struct LineRepo {
    _pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct LineGroupRow {
    account_name: String,
    direction: DebitOrCredit,
    accountable_kind: Option<String>,
    accountable_id: Option<AccountableId>,
    currency: String,
    minor_units: i64,
}

impl LineRepo {
    pub(crate) fn new(pool: &PgPool) -> Self {
        Self {
            _pool: pool.clone(),
        }
    }

    #[instrument(
        level = "trace",
        name = "tally_ledger.lines.create_all",
        skip(self, db, lines)
    )]
    pub(crate) async fn create_all(
        &self,
        db: &mut Transaction<'_, Postgres>,
        lines: &[NewLine],
    ) -> Result<Vec<LineValues>, LineError> {
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"INSERT INTO tally_lines
               (id, entry_id, tenant_kind, tenant_id, entry_code, document_kind, document_id,
                account_name, direction, accountable_kind, accountable_id,
                amount, currency, created_at)"#,
        );
        let mut line_values = Vec::with_capacity(lines.len());
        query_builder.push_values(lines.iter(), |mut builder, line: &NewLine| {
            line_values.push(line.to_values());
            builder.push_bind(line.id);
            builder.push_bind(line.entry_id);
            builder.push_bind(line.tenant.kind.as_str());
            builder.push_bind(line.tenant.id);
            builder.push_bind(line.entry_code.as_str());
            builder.push_bind(line.document.kind.as_str());
            builder.push_bind(line.document.id);
            builder.push_bind(line.account_name.as_str());
            builder.push_bind(line.direction);
            builder.push_bind(line.accountable.as_ref().map(|a| a.kind.as_str()));
            builder.push_bind(line.accountable.as_ref().map(|a| a.id));
            builder.push_bind(line.amount.minor_units());
            builder.push_bind(line.amount.currency().code());
            builder.push_bind(line.created_at);
        });
        let query = query_builder.build();
        query.execute(&mut **db).await?;
        Ok(line_values)
    }

    #[instrument(
        level = "trace",
        name = "tally_ledger.lines.sum_grouped",
        skip(self, db)
    )]
    pub(crate) async fn sum_grouped(
        &self,
        db: &mut Transaction<'_, Postgres>,
        key: &EntryKey,
    ) -> Result<Vec<LineGroup>, LineError> {
        let rows = sqlx::query_as::<_, LineGroupRow>(
            r#"SELECT account_name, direction, accountable_kind, accountable_id, currency,
                      SUM(amount)::BIGINT AS minor_units
               FROM tally_lines
               WHERE tenant_kind = $1 AND tenant_id = $2 AND entry_code = $3
                 AND document_kind = $4 AND document_id = $5
               GROUP BY account_name, direction, accountable_kind, accountable_id, currency"#,
        )
        .bind(key.tenant.kind.as_str())
        .bind(key.tenant.id)
        .bind(key.code.as_str())
        .bind(key.document.kind.as_str())
        .bind(key.document.id)
        .fetch_all(&mut **db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| LineGroup {
                account_name: row.account_name,
                direction: row.direction,
                accountable: match (row.accountable_kind, row.accountable_id) {
                    (Some(kind), Some(id)) => Some(AccountableRef::new(kind, id)),
                    _ => None,
                },
                currency: row.currency.parse().expect("Could not parse currency"),
                minor_units: row.minor_units,
            })
            .collect())
    }
}
