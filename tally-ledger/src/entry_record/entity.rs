use chrono::{DateTime, NaiveDate, Utc};
use derive_builder::Builder;

pub use tally_types::entry::{EntryKey, EntryRecordValues};

use crate::primitives::*;

/// One posting event about to be committed.
#[derive(Builder, Debug, Clone)]
#[builder(pattern = "owned")]
pub struct NewEntryRecord {
    #[builder(setter(into))]
    pub(crate) id: EntryId,
    pub(crate) tenant: TenantRef,
    #[builder(setter(into))]
    pub(crate) code: String,
    pub(crate) document: DocumentRef,
    pub(crate) effective: NaiveDate,
    pub(crate) created_at: DateTime<Utc>,
}

impl NewEntryRecord {
    pub fn builder() -> NewEntryRecordBuilder {
        NewEntryRecordBuilder::default()
    }

    pub(crate) fn to_values(&self) -> EntryRecordValues {
        EntryRecordValues {
            id: self.id,
            tenant: self.tenant.clone(),
            code: self.code.clone(),
            document: self.document.clone(),
            effective: self.effective,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds() {
        let new_entry = NewEntryRecord::builder()
            .id(uuid::Uuid::new_v4())
            .tenant(TenantRef::new("company", TenantId::new()))
            .code("sale")
            .document(DocumentRef::new("invoice", DocumentId::new()))
            .effective(chrono::NaiveDate::default())
            .created_at(chrono::Utc::now())
            .build()
            .unwrap();
        assert_eq!(new_entry.code, "sale");
    }

    #[test]
    fn fails_when_mandatory_fields_are_missing() {
        let new_entry = NewEntryRecord::builder().build();
        assert!(new_entry.is_err());
    }
}
