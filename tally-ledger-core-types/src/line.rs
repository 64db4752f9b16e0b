use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{money::Money, primitives::*};

/// One persisted account leg of one committed entry. Append-only: lines
/// are never updated or deleted; corrections are new lines under a new
/// entry row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineValues {
    pub id: LineId,
    pub entry_id: EntryId,
    pub tenant: TenantRef,
    pub entry_code: String,
    pub document: DocumentRef,
    pub account_name: String,
    pub direction: DebitOrCredit,
    pub accountable: Option<AccountableRef>,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

/// One row of the store's grouped aggregation over the lines of a
/// triple: the net minor units ever posted against one account leg.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineGroup {
    pub account_name: String,
    pub direction: DebitOrCredit,
    pub accountable: Option<AccountableRef>,
    pub currency: Currency,
    pub minor_units: i64,
}
