use chrono::{DateTime, Utc};
use derive_builder::Builder;

pub use tally_types::line::{LineGroup, LineValues};
use tally_types::money::Money;

use crate::primitives::*;

/// One account leg about to be committed under a new entry row.
#[derive(Builder, Debug, Clone)]
#[builder(pattern = "owned")]
pub struct NewLine {
    #[builder(setter(into))]
    pub(crate) id: LineId,
    #[builder(setter(into))]
    pub(crate) entry_id: EntryId,
    pub(crate) tenant: TenantRef,
    #[builder(setter(into))]
    pub(crate) entry_code: String,
    pub(crate) document: DocumentRef,
    #[builder(setter(into))]
    pub(crate) account_name: String,
    pub(crate) direction: DebitOrCredit,
    #[builder(default)]
    pub(crate) accountable: Option<AccountableRef>,
    pub(crate) amount: Money,
    pub(crate) created_at: DateTime<Utc>,
}

impl NewLine {
    pub fn builder() -> NewLineBuilder {
        NewLineBuilder::default()
    }

    pub(crate) fn to_values(&self) -> LineValues {
        LineValues {
            id: self.id,
            entry_id: self.entry_id,
            tenant: self.tenant.clone(),
            entry_code: self.entry_code.clone(),
            document: self.document.clone(),
            account_name: self.account_name.clone(),
            direction: self.direction,
            accountable: self.accountable.clone(),
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}
