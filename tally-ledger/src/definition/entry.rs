use crate::primitives::DebitOrCredit;

use super::movement::MovementDefinition;

/// The shape of one posting event: its code, the document kind it must
/// be posted for, and the legs it may carry.
#[derive(Debug, Clone)]
pub struct EntryDefinition {
    code: String,
    document_kind: String,
    movements: Vec<MovementDefinition>,
}

impl EntryDefinition {
    pub(super) fn new(
        code: String,
        document_kind: String,
        movements: Vec<MovementDefinition>,
    ) -> Self {
        Self {
            code,
            document_kind,
            movements,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn document_kind(&self) -> &str {
        &self.document_kind
    }

    pub fn movements(&self) -> &[MovementDefinition] {
        &self.movements
    }

    pub fn find_movement(
        &self,
        direction: DebitOrCredit,
        account_name: &str,
        accountable_kind: Option<&str>,
    ) -> Option<&MovementDefinition> {
        self.movements
            .iter()
            .find(|m| m.matches(direction, account_name, accountable_kind))
    }
}
