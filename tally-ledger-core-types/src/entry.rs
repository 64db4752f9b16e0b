use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::*;

/// The (tenant, entry code, document) triple one posting call operates
/// on. All entry rows sharing a key describe re-postings of the same
/// logical business event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub tenant: TenantRef,
    pub code: String,
    pub document: DocumentRef,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryRecordValues {
    pub id: EntryId,
    pub tenant: TenantRef,
    pub code: String,
    pub document: DocumentRef,
    pub effective: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl EntryRecordValues {
    pub fn key(&self) -> EntryKey {
        EntryKey {
            tenant: self.tenant.clone(),
            code: self.code.clone(),
            document: self.document.clone(),
        }
    }
}
